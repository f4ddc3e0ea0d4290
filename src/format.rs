//! Renders a [`Number`](crate::Number) into the display string of the
//! calculator. The value keeps its full internal precision; only the string
//! is capped at [`DISPLAY_SIG_DIGITS`] significant digits.

use num::bigint::BigInt;
use num::traits::{Pow, Signed, Zero};
use num::Integer;

use crate::value::Number;

/// Maximum significant digits in the displayed string.
pub const DISPLAY_SIG_DIGITS: usize = 14;

/// Exponential notation is used once the decimal exponent of the leading
/// digit reaches this value, i.e. for magnitudes of 1e15 and above.
pub const UPPER_EXP_THRESHOLD: i64 = 15;

/// Exponential notation is used once the decimal exponent of the leading
/// digit falls below this value, i.e. for magnitudes below 1e-9.
pub const LOWER_EXP_THRESHOLD: i64 = -9;

fn ten_pow(e: u32) -> BigInt {
    Pow::pow(BigInt::from(10), e)
}

fn n_digits(x: &BigInt) -> usize {
    x.to_string().len()
}

/// Formats an exact rational with at most 14 significant digits, trailing
/// zeros stripped, and without a decimal point for integers. Rounding is
/// half away from zero. Very large and very small magnitudes switch to
/// exponential notation at the documented thresholds.
///
/// Pure function of the value; formatting twice yields identical strings.
pub fn format_number(x: &Number) -> String {
    let ratio = x.as_ratio();
    if ratio.is_zero() {
        return "0".to_string();
    }
    let negative = ratio.is_negative();
    let n = ratio.numer().abs();
    let d = ratio.denom().clone();

    // Scale the quotient to 16 or 17 digits, two to three more than needed,
    // so that the subsequent rounding step sees the exact value.
    let extra = DISPLAY_SIG_DIGITS as i64 + 2;
    let shift = extra + n_digits(&d) as i64 - n_digits(&n) as i64;
    let (scaled_n, scaled_d) = if shift >= 0 {
        (&n * ten_pow(shift as u32), d)
    } else {
        (n, &d * ten_pow((-shift) as u32))
    };
    let (q, _) = scaled_n.div_rem(&scaled_d);

    // Round half away from zero down to the display precision. The remainder
    // of the division above cannot push a rounded-down digit back up, since
    // we kept two spare digits.
    let drop = n_digits(&q) as i64 - DISPLAY_SIG_DIGITS as i64;
    let divisor = ten_pow(drop as u32);
    let (mut digits, rem) = q.div_rem(&divisor);
    if &rem * BigInt::from(2) >= divisor {
        digits += 1u32;
    }
    let ten = BigInt::from(10);
    // exponent of the least significant kept digit
    let mut lsd_exp = drop - shift;
    if n_digits(&digits) > DISPLAY_SIG_DIGITS {
        // rounding carried into a new leading digit, e.g. 999.99 -> 1000
        digits = &digits / &ten;
        lsd_exp += 1;
    }
    while (&digits % &ten).is_zero() {
        digits = &digits / &ten;
        lsd_exp += 1;
    }

    let digit_str = digits.to_string();
    let msd_exp = lsd_exp + digit_str.len() as i64 - 1;

    let body = if msd_exp >= UPPER_EXP_THRESHOLD || msd_exp < LOWER_EXP_THRESHOLD {
        format_exponential(&digit_str, msd_exp)
    } else {
        format_fixed(&digit_str, lsd_exp, msd_exp)
    };
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

fn format_exponential(digits: &str, msd_exp: i64) -> String {
    let mantissa = if digits.len() == 1 {
        digits.to_string()
    } else {
        format!("{}.{}", &digits[..1], &digits[1..])
    };
    let sign = if msd_exp < 0 { '-' } else { '+' };
    format!("{}e{}{}", mantissa, sign, msd_exp.abs())
}

fn format_fixed(digits: &str, lsd_exp: i64, msd_exp: i64) -> String {
    if lsd_exp >= 0 {
        // integral value, pad with trailing zeros up to the units digit
        let zeros = "0".repeat(lsd_exp as usize);
        format!("{}{}", digits, zeros)
    } else if msd_exp >= 0 {
        let point = (msd_exp + 1) as usize;
        format!("{}.{}", &digits[..point], &digits[point..])
    } else {
        let zeros = "0".repeat((-msd_exp - 1) as usize);
        format!("0.{}{}", zeros, digits)
    }
}
