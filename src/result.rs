use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Classification of everything that can go wrong between a raw input string
/// and a formatted result. Lexing, parsing, and evaluation each contribute
/// their own kinds so that callers and tests can tell, e.g., a stray
/// character apart from a division by zero.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum ErrorKind {
    UnknownCharacter,
    UnknownIdentifier,
    UnexpectedToken,
    UnbalancedParentheses,
    MissingOperand,
    WrongArity,
    EmptyExpression,
    DivisionByZero,
    DomainError,
    Overflow,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::UnknownCharacter => "unknown character",
            ErrorKind::UnknownIdentifier => "unknown identifier",
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::UnbalancedParentheses => "unbalanced parentheses",
            ErrorKind::MissingOperand => "missing operand",
            ErrorKind::WrongArity => "wrong number of arguments",
            ErrorKind::EmptyExpression => "empty expression",
            ErrorKind::DivisionByZero => "division by zero",
            ErrorKind::DomainError => "domain error",
            ErrorKind::Overflow => "overflow",
        };
        f.write_str(name)
    }
}

/// This will be thrown at you if something within Omnicalc went wrong. Ok,
/// obviously it is not an exception, so thrown needs to be understood
/// figuratively. Besides the message there is a [`kind`](CalcError::kind)
/// that survives for logging and testing even after the UI has collapsed the
/// outcome into a generic error display.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct CalcError {
    kind: ErrorKind,
    msg: String,
}

impl CalcError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}
impl Error for CalcError {}

/// Creates a [`CalcError`](CalcError) from an [`ErrorKind`](ErrorKind) and
/// format arguments.
#[macro_export]
macro_rules! calcerr {
    ($kind:expr, $($arg:tt)*) => {
        $crate::CalcError::new($kind, format!($($arg)*))
    };
}

/// Omnicalc's result type with [`CalcError`](CalcError) as error type.
pub type CalcResult<U> = Result<U, CalcError>;
