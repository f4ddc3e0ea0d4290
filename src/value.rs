use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use num::bigint::BigInt;
use num::rational::BigRational;
use num::traits::{One, Pow, Signed, ToPrimitive, Zero};

use crate::format::format_number;
use crate::{calcerr, CalcResult, ErrorKind};

/// Largest operand accepted by [`factorial`](Number::factorial). `2000!` has
/// a few thousand digits and is still computed instantly; anything beyond is
/// reported as an overflow instead of burning time on a number nobody can
/// read anyway.
const MAX_FACTORIAL_OPERAND: u32 = 2000;

/// Largest integer exponent that is raised exactly on rationals. Larger
/// exponents fall back to the float path where they usually end up as an
/// overflow error.
const MAX_EXACT_EXPONENT: i32 = 4096;

/// High-precision numeric value of the evaluator, a thin wrapper around
/// [`BigRational`](num::rational::BigRational).
///
/// The four arithmetic operations, percent, factorial, and integer powers are
/// exact, which is what makes `0.1 + 0.2` display as `0.3`. Transcendental
/// functions go through `f64` (more than 15 significant digits) and convert
/// the result back into a rational; the display layer rounds to 14
/// significant digits, so the float round-trip stays invisible.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct Number(BigRational);

impl Number {
    pub fn zero() -> Self {
        Number(BigRational::zero())
    }

    pub fn one() -> Self {
        Number(BigRational::one())
    }

    pub fn from_integer(n: i64) -> Self {
        Number(BigRational::from_integer(BigInt::from(n)))
    }

    /// Converts a float back into an exact rational. Non-finite values are
    /// reported as overflow, the only way the float paths can fail silently
    /// otherwise.
    pub fn from_f64(x: f64) -> CalcResult<Self> {
        match BigRational::from_float(x) {
            Some(r) => Ok(Number(r)),
            None => Err(calcerr!(ErrorKind::Overflow, "result {} is not finite", x)),
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub(crate) fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    pub fn add(&self, other: &Number) -> Number {
        Number(&self.0 + &other.0)
    }

    pub fn sub(&self, other: &Number) -> Number {
        Number(&self.0 - &other.0)
    }

    pub fn mul(&self, other: &Number) -> Number {
        Number(&self.0 * &other.0)
    }

    pub fn div(&self, other: &Number) -> CalcResult<Number> {
        if other.is_zero() {
            Err(calcerr!(ErrorKind::DivisionByZero, "division by zero"))
        } else {
            Ok(Number(&self.0 / &other.0))
        }
    }

    pub fn neg(&self) -> Number {
        Number(-self.0.clone())
    }

    pub fn abs(&self) -> Number {
        Number(self.0.abs())
    }

    /// A trailing `%` scales the preceding term by 1/100 and nothing else;
    /// `100+10%` is `100.1`, not `110`.
    pub fn percent(&self) -> Number {
        let hundred = BigRational::from_integer(BigInt::from(100));
        Number(&self.0 / &hundred)
    }

    /// Factorial of a non-negative integer, computed exactly.
    pub fn factorial(&self) -> CalcResult<Number> {
        if !self.is_integer() || self.is_negative() {
            return Err(calcerr!(
                ErrorKind::DomainError,
                "factorial is only defined for non-negative integers, got {}",
                self
            ));
        }
        let n = self.0.to_integer().to_u32().filter(|n| *n <= MAX_FACTORIAL_OPERAND);
        let n = n.ok_or_else(|| calcerr!(ErrorKind::Overflow, "factorial operand {} too large", self))?;
        let mut acc = BigInt::one();
        for k in 2..=n {
            acc *= k;
        }
        Ok(Number(BigRational::from_integer(acc)))
    }

    /// Exponentiation. Integer exponents up to [`MAX_EXACT_EXPONENT`] are
    /// raised exactly on the rational; everything else goes through the
    /// float path. `0^0` is 1 by calculator convention.
    pub fn pow(&self, exponent: &Number) -> CalcResult<Number> {
        if exponent.is_integer() {
            match exponent.0.to_integer().to_i32() {
                Some(e) if e.unsigned_abs() <= MAX_EXACT_EXPONENT as u32 => {
                    if e < 0 && self.is_zero() {
                        return Err(calcerr!(
                            ErrorKind::DivisionByZero,
                            "zero raised to the negative power {}",
                            e
                        ));
                    }
                    Ok(Number(Pow::pow(self.0.clone(), e)))
                }
                _ => Err(calcerr!(
                    ErrorKind::Overflow,
                    "exponent {} exceeds the supported range",
                    exponent
                )),
            }
        } else if self.is_negative() {
            Err(calcerr!(
                ErrorKind::DomainError,
                "negative base {} with fractional exponent",
                self
            ))
        } else {
            Number::from_f64(self.to_f64().powf(exponent.to_f64()))
        }
    }

    /// Square root; exact whenever numerator and denominator are perfect
    /// squares, e.g. `sqrt(9/4)` is exactly `3/2`.
    pub fn sqrt(&self) -> CalcResult<Number> {
        if self.is_negative() {
            return Err(calcerr!(
                ErrorKind::DomainError,
                "square root of negative number {}",
                self
            ));
        }
        let n = self.0.numer();
        let d = self.0.denom();
        let sn = n.sqrt();
        let sd = d.sqrt();
        if &(&sn * &sn) == n && &(&sd * &sd) == d {
            return Ok(Number(BigRational::new(sn, sd)));
        }
        Number::from_f64(self.to_f64().sqrt())
    }

    /// Natural logarithm; the argument must be positive.
    pub fn ln(&self) -> CalcResult<Number> {
        self.log_checked(|x| x.ln(), "log")
    }

    /// Base-10 logarithm; the argument must be positive.
    pub fn log10(&self) -> CalcResult<Number> {
        self.log_checked(|x| x.log10(), "log10")
    }

    fn log_checked(&self, f: fn(f64) -> f64, name: &str) -> CalcResult<Number> {
        if self.is_negative() || self.is_zero() {
            return Err(calcerr!(
                ErrorKind::DomainError,
                "{} of non-positive number {}",
                name,
                self
            ));
        }
        Number::from_f64(f(self.to_f64()))
    }

    /// Sine of an angle given in degrees.
    pub fn sin_deg(&self) -> CalcResult<Number> {
        if let Some(angle) = self.reduced_degrees() {
            if let Some(exact) = sin_table(angle) {
                return Ok(exact);
            }
        }
        Number::from_f64(self.to_f64().to_radians().sin())
    }

    /// Cosine of an angle given in degrees.
    pub fn cos_deg(&self) -> CalcResult<Number> {
        if let Some(angle) = self.reduced_degrees() {
            if let Some(exact) = sin_table((angle + 90) % 360) {
                return Ok(exact);
            }
        }
        Number::from_f64(self.to_f64().to_radians().cos())
    }

    /// Tangent of an angle given in degrees. Undefined at odd multiples of
    /// 90 degrees.
    pub fn tan_deg(&self) -> CalcResult<Number> {
        if let Some(angle) = self.reduced_degrees() {
            if angle == 90 || angle == 270 {
                return Err(calcerr!(
                    ErrorKind::DomainError,
                    "tangent is undefined at {} degrees",
                    angle
                ));
            }
            if let Some(exact) = tan_table(angle) {
                return Ok(exact);
            }
        }
        Number::from_f64(self.to_f64().to_radians().tan())
    }

    /// Arcsine in degrees; the argument must lie in [-1, 1].
    pub fn asin_deg(&self) -> CalcResult<Number> {
        self.arc_checked(|x| x.asin(), "asin")
    }

    /// Arccosine in degrees; the argument must lie in [-1, 1].
    pub fn acos_deg(&self) -> CalcResult<Number> {
        self.arc_checked(|x| x.acos(), "acos")
    }

    /// Arctangent in degrees.
    pub fn atan_deg(&self) -> CalcResult<Number> {
        Number::from_f64(self.to_f64().atan().to_degrees())
    }

    fn arc_checked(&self, f: fn(f64) -> f64, name: &str) -> CalcResult<Number> {
        let one = BigRational::one();
        if self.0.abs() > one {
            return Err(calcerr!(
                ErrorKind::DomainError,
                "{} argument {} outside [-1, 1]",
                name,
                self
            ));
        }
        Number::from_f64(f(self.to_f64()).to_degrees())
    }

    /// Reduces the angle modulo 360 and returns it if it is a whole number
    /// of degrees, the precondition for the exact special-angle tables.
    fn reduced_degrees(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        let full_turn = BigInt::from(360);
        let deg = self.0.to_integer();
        let reduced = ((deg % &full_turn) + &full_turn) % &full_turn;
        reduced.to_i64()
    }
}

/// nth root with the degree first, matching the keypad's `nthRoot(root, val)`
/// calling convention. Exact whenever numerator and denominator of the
/// radicand are perfect nth powers. Even roots of negative values are domain
/// errors, odd roots of negative values are negative.
pub fn nth_root(degree: &Number, radicand: &Number) -> CalcResult<Number> {
    if !degree.is_integer() || degree.is_negative() || degree.is_zero() {
        return Err(calcerr!(
            ErrorKind::DomainError,
            "root degree must be a positive integer, got {}",
            degree
        ));
    }
    let k = degree
        .as_ratio()
        .to_integer()
        .to_u32()
        .ok_or_else(|| calcerr!(ErrorKind::Overflow, "root degree {} too large", degree))?;
    let even = k % 2 == 0;
    if even && radicand.is_negative() {
        return Err(calcerr!(
            ErrorKind::DomainError,
            "even root of negative number {}",
            radicand
        ));
    }
    let n = radicand.as_ratio().numer();
    let d = radicand.as_ratio().denom();
    let rn = n.nth_root(k);
    let rd = d.nth_root(k);
    if Pow::pow(&rn, k) == *n && Pow::pow(&rd, k) == *d {
        return Ok(Number(BigRational::new(rn, rd)));
    }
    let x = radicand.to_f64();
    let root = if x < 0.0 {
        -(-x).powf(1.0 / k as f64)
    } else {
        x.powf(1.0 / k as f64)
    };
    Number::from_f64(root)
}

/// Exact sine values for the whole-degree special angles whose sine is
/// rational. Cosine reuses this table shifted by 90 degrees.
fn sin_table(angle: i64) -> Option<Number> {
    let half = || Number(BigRational::new(BigInt::one(), BigInt::from(2)));
    match angle {
        0 | 180 => Some(Number::zero()),
        90 => Some(Number::one()),
        270 => Some(Number::from_integer(-1)),
        30 | 150 => Some(half()),
        210 | 330 => Some(half().neg()),
        _ => None,
    }
}

fn tan_table(angle: i64) -> Option<Number> {
    match angle {
        0 | 180 => Some(Number::zero()),
        45 | 225 => Some(Number::one()),
        135 | 315 => Some(Number::from_integer(-1)),
        _ => None,
    }
}

impl FromStr for Number {
    type Err = crate::CalcError;

    /// Parses a decimal literal with at most one `.` into an exact rational,
    /// e.g. `12.25` becomes `49/4`.
    fn from_str(s: &str) -> CalcResult<Self> {
        let n_dots = s.chars().filter(|c| *c == '.').count();
        let only_numeric = s.chars().all(|c| c.is_ascii_digit() || c == '.');
        if s.is_empty() || s == "." || n_dots > 1 || !only_numeric {
            return Err(calcerr!(
                ErrorKind::UnknownCharacter,
                "cannot parse '{}' as a number",
                s
            ));
        }
        let frac_len = match s.find('.') {
            Some(idx) => s.len() - idx - 1,
            None => 0,
        };
        let digits = s.replace('.', "");
        let numer = if digits.is_empty() {
            BigInt::zero()
        } else {
            // only ascii digits can be left at this point
            digits.parse::<BigInt>().map_err(|e| {
                calcerr!(ErrorKind::UnknownCharacter, "cannot parse '{}': {}", s, e)
            })?
        };
        let denom = Pow::pow(BigInt::from(10), frac_len);
        Ok(Number(BigRational::new(numer, denom)))
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&format_number(self))
    }
}

#[cfg(test)]
mod tests {
    use super::{nth_root, Number};
    use crate::ErrorKind;
    use std::str::FromStr;

    fn num(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    #[test]
    fn test_literal_parsing() {
        assert_eq!(num("4."), Number::from_integer(4));
        assert_eq!(num(".5"), num("0.5"));
        assert!(Number::from_str(".").is_err());
        assert!(Number::from_str("3.4.").is_err());
        assert!(Number::from_str("").is_err());
    }

    #[test]
    fn test_exact_addition() {
        // the motivating case for rational arithmetic
        assert_eq!(num("0.1").add(&num("0.2")), num("0.3"));
    }

    #[test]
    fn test_division() {
        assert_eq!(num("10").div(&num("4")).unwrap(), num("2.5"));
        let err = num("5").div(&Number::zero()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(num("5").factorial().unwrap(), num("120"));
        assert_eq!(num("0").factorial().unwrap(), num("1"));
        assert_eq!(
            num("2.5").factorial().unwrap_err().kind(),
            ErrorKind::DomainError
        );
        assert_eq!(
            num("3").neg().factorial().unwrap_err().kind(),
            ErrorKind::DomainError
        );
        assert_eq!(
            num("5000").factorial().unwrap_err().kind(),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn test_pow() {
        assert_eq!(num("2").pow(&num("10")).unwrap(), num("1024"));
        assert_eq!(num("2").pow(&Number::from_integer(-2)).unwrap(), num("0.25"));
        assert_eq!(num("0").pow(&num("0")).unwrap(), num("1"));
        assert_eq!(
            Number::zero().pow(&Number::from_integer(-1)).unwrap_err().kind(),
            ErrorKind::DivisionByZero
        );
        assert_eq!(
            num("2").pow(&num("100000")).unwrap_err().kind(),
            ErrorKind::Overflow
        );
        // fractional exponent goes through the float path
        let r = num("4").pow(&num("0.5")).unwrap().to_f64();
        assert!((r - 2.0).abs() < 1e-12);
        assert_eq!(
            num("2").neg().pow(&num("0.5")).unwrap_err().kind(),
            ErrorKind::DomainError
        );
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(num("9").sqrt().unwrap(), num("3"));
        assert_eq!(num("2.25").sqrt().unwrap(), num("1.5"));
        assert_eq!(num("4").neg().sqrt().unwrap_err().kind(), ErrorKind::DomainError);
        let r = num("2").sqrt().unwrap().to_f64();
        assert!((r - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_nth_root() {
        // degree first, radicand second
        assert_eq!(nth_root(&num("3"), &num("27")).unwrap(), num("3"));
        assert_eq!(nth_root(&num("2"), &num("16")).unwrap(), num("4"));
        assert_eq!(
            nth_root(&num("3"), &num("27").neg()).unwrap(),
            num("3").neg()
        );
        assert_eq!(
            nth_root(&num("2"), &num("16").neg()).unwrap_err().kind(),
            ErrorKind::DomainError
        );
        assert_eq!(
            nth_root(&num("0.5"), &num("4")).unwrap_err().kind(),
            ErrorKind::DomainError
        );
    }

    #[test]
    fn test_logarithms() {
        let r = num("100").log10().unwrap().to_f64();
        assert!((r - 2.0).abs() < 1e-12);
        assert_eq!(num("0").ln().unwrap_err().kind(), ErrorKind::DomainError);
        assert_eq!(
            num("5").neg().log10().unwrap_err().kind(),
            ErrorKind::DomainError
        );
    }

    #[test]
    fn test_trig_special_angles() {
        assert_eq!(num("90").sin_deg().unwrap(), num("1"));
        assert_eq!(num("30").sin_deg().unwrap(), num("0.5"));
        assert_eq!(num("450").sin_deg().unwrap(), num("1"));
        assert_eq!(num("90").neg().sin_deg().unwrap(), num("1").neg());
        assert_eq!(num("180").cos_deg().unwrap(), num("1").neg());
        assert_eq!(num("45").tan_deg().unwrap(), num("1"));
        assert_eq!(
            num("90").tan_deg().unwrap_err().kind(),
            ErrorKind::DomainError
        );
    }

    #[test]
    fn test_arc_functions() {
        let r = num("0.5").asin_deg().unwrap().to_f64();
        assert!((r - 30.0).abs() < 1e-9);
        assert_eq!(num("2").asin_deg().unwrap_err().kind(), ErrorKind::DomainError);
        let r = num("1").atan_deg().unwrap().to_f64();
        assert!((r - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent() {
        assert_eq!(num("50").percent(), num("0.5"));
        assert_eq!(num("10").percent().add(&num("100")), num("100.1"));
    }
}
