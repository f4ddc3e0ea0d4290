//! Omnicalc is the evaluation engine of a scientific calculator: it turns a
//! human-typed expression string into a correctly rounded display string.
//!
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! assert_eq!(omnicalc::evaluate("0.1+0.2")?, "0.3");
//! assert_eq!(omnicalc::evaluate("2^3^2")?, "512");
//! assert_eq!(omnicalc::evaluate("sin(90)")?, "1");
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! The pipeline is normalize → tokenize → parse → evaluate → format. Each
//! stage either succeeds or returns the first [`CalcError`](CalcError) it
//! encounters, whose [`ErrorKind`](ErrorKind) distinguishes lexing, parsing,
//! and numeric failures:
//!
//! ```rust
//! use omnicalc::ErrorKind;
//! let err = omnicalc::evaluate("5/0").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DivisionByZero);
//! ```
//!
//! Arithmetic runs on exact rationals ([`Number`](Number) wraps
//! [`num::BigRational`](num::rational::BigRational)), so decimal inputs never
//! pick up binary floating point artifacts; transcendental functions go
//! through `f64` and stay well above the 14 significant digits the display
//! shows. Evaluation is a pure function without process-wide state, safe to
//! call from any number of threads.

mod eval;
mod format;
mod normalize;
mod operators;
mod parse;
mod parser;
#[macro_use]
mod result;
mod state;
mod value;

pub use format::{format_number, DISPLAY_SIG_DIGITS, LOWER_EXP_THRESHOLD, UPPER_EXP_THRESHOLD};
pub use normalize::normalize;
pub use operators::{BinKind, Const, Func, UnaryKind};
pub use parse::{parse, Ast};
pub use parser::{tokenize, OpToken, Token, TokenVec};
pub use result::{CalcError, CalcResult, ErrorKind};
pub use state::{generate_id, Calculator, HistoryItem, Mode};
pub use value::Number;

/// Evaluates a calculator expression into its display string.
///
/// The input may contain the UI convenience glyphs `×`, `÷`, `π`, `√(`, and
/// the calculator meanings of `log`/`ln`; they are normalized before
/// tokenization. A trimmed-empty input is an
/// [`EmptyExpression`](ErrorKind::EmptyExpression) error rather than a
/// panic, so a UI can call this with whatever the user has typed so far.
///
/// # Errors
///
/// * [`ErrorKind::UnknownCharacter`] / [`ErrorKind::UnknownIdentifier`] from
///   the tokenizer,
/// * [`ErrorKind::UnexpectedToken`], [`ErrorKind::UnbalancedParentheses`],
///   [`ErrorKind::MissingOperand`], [`ErrorKind::WrongArity`], and
///   [`ErrorKind::EmptyExpression`] from the parser,
/// * [`ErrorKind::DivisionByZero`], [`ErrorKind::DomainError`], and
///   [`ErrorKind::Overflow`] from the evaluator.
///
pub fn evaluate(expression: &str) -> CalcResult<String> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(calcerr!(ErrorKind::EmptyExpression, "input is empty"));
    }
    let canonical = normalize::normalize(trimmed);
    let tokens = parser::tokenize(&canonical)?;
    let ast = parse::parse(&tokens)?;
    let value = eval::eval(&ast)?;
    Ok(format::format_number(&value))
}
