//! Tables of the binary operators, postfix/prefix operators, named
//! functions, and named constants the grammar knows about.

use std::fmt::{self, Display, Formatter};

use crate::value::{nth_root, Number};
use crate::{calcerr, CalcResult, ErrorKind};

/// Binary operators of the grammar.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BinKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinKind {
    pub fn apply(&self, lhs: &Number, rhs: &Number) -> CalcResult<Number> {
        match self {
            BinKind::Add => Ok(lhs.add(rhs)),
            BinKind::Sub => Ok(lhs.sub(rhs)),
            BinKind::Mul => Ok(lhs.mul(rhs)),
            BinKind::Div => lhs.div(rhs),
            BinKind::Pow => lhs.pow(rhs),
        }
    }
}

/// Prefix and postfix operators of the grammar.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum UnaryKind {
    /// Prefix `-`.
    Neg,
    /// Postfix `!`.
    Fact,
    /// Postfix `%`, scales the preceding term by 1/100.
    Percent,
}

impl UnaryKind {
    pub fn apply(&self, operand: &Number) -> CalcResult<Number> {
        match self {
            UnaryKind::Neg => Ok(operand.neg()),
            UnaryKind::Fact => operand.factorial(),
            UnaryKind::Percent => Ok(operand.percent()),
        }
    }
}

/// Named functions with fixed arity. Trigonometric functions take and return
/// angles in degrees, the calculator's default unit. The canonical `log` is
/// the natural logarithm; the UI's base-10 `log` arrives here as `log10`
/// after normalization.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Log10,
    Sqrt,
    Abs,
    /// Two arguments, degree first: `nthRoot(3, 27)` is the cube root of 27.
    NthRoot,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Func> {
        Some(match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "log" => Func::Log,
            "log10" => Func::Log10,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            "nthRoot" => Func::NthRoot,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Log => "log",
            Func::Log10 => "log10",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
            Func::NthRoot => "nthRoot",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Func::NthRoot => 2,
            _ => 1,
        }
    }

    pub fn apply(&self, args: &[Number]) -> CalcResult<Number> {
        if args.len() != self.arity() {
            return Err(calcerr!(
                ErrorKind::WrongArity,
                "{} takes {} argument(s), got {}",
                self.name(),
                self.arity(),
                args.len()
            ));
        }
        match self {
            Func::Sin => args[0].sin_deg(),
            Func::Cos => args[0].cos_deg(),
            Func::Tan => args[0].tan_deg(),
            Func::Asin => args[0].asin_deg(),
            Func::Acos => args[0].acos_deg(),
            Func::Atan => args[0].atan_deg(),
            Func::Log => args[0].ln(),
            Func::Log10 => args[0].log10(),
            Func::Sqrt => args[0].sqrt(),
            Func::Abs => Ok(args[0].abs()),
            Func::NthRoot => nth_root(&args[0], &args[1]),
        }
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named constants.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Const {
    Pi,
    E,
}

impl Const {
    pub fn from_name(name: &str) -> Option<Const> {
        match name {
            "pi" => Some(Const::Pi),
            "e" => Some(Const::E),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Const::Pi => "pi",
            Const::E => "e",
        }
    }

    pub fn value(&self) -> Number {
        let x = match self {
            Const::Pi => std::f64::consts::PI,
            Const::E => std::f64::consts::E,
        };
        // finite constants, from_f64 cannot fail here
        Number::from_f64(x).unwrap_or_else(|_| Number::zero())
    }
}

impl Display for Const {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
