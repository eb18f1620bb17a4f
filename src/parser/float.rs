//! Floating-point targets
//!
//! The tokenizer keeps enough digits to decide rounding for each format;
//! a dropped non-zero tail is represented by one extra sticky `1` digit.
//! The resulting decimal literal is then rounded correctly to the target.

use std::cmp::Ordering;

use half::f16;

use super::buffer::NumberBuffer;
use super::chars::{eq_ignore_case, strip_prefix_ignore_case};
use crate::locale::NumberFormatInfo;
use crate::types::NumericType;

/// Per-format parameters of a floating-point target
pub(crate) trait FloatTarget: Copy {
    /// Digits retained by the tokenizer
    const BUFFER_DIGITS: usize;
    /// Scales below this are zero
    const MIN_EXPONENT: i32;
    /// Scales above this are infinite
    const MAX_EXPONENT: i32;
    /// Name used in messages
    const NUMERIC: NumericType;

    const ZERO: Self;
    const INFINITY: Self;
    const NAN: Self;

    fn negate(self) -> Self;

    /// Round a positive decimal `0.<digits> * 10^scale` to this format
    fn from_decimal(number: &NumberBuffer) -> Option<Self>;
}

/// Decimal literal "0.<digits>[1]e<scale>" for the std float parser
fn decimal_literal(number: &NumberBuffer) -> String {
    let sticky = if number.has_non_zero_tail() { "1" } else { "" };
    format!("0.{}{}e{}", number.digits_str(), sticky, number.scale())
}

impl FloatTarget for f64 {
    const BUFFER_DIGITS: usize = 768;
    const MIN_EXPONENT: i32 = -324;
    const MAX_EXPONENT: i32 = 309;
    const NUMERIC: NumericType = NumericType::Double;

    const ZERO: Self = 0.0;
    const INFINITY: Self = f64::INFINITY;
    const NAN: Self = f64::NAN;

    fn negate(self) -> Self {
        -self
    }

    fn from_decimal(number: &NumberBuffer) -> Option<Self> {
        decimal_literal(number).parse().ok()
    }
}

impl FloatTarget for f32 {
    const BUFFER_DIGITS: usize = 113;
    const MIN_EXPONENT: i32 = -45;
    const MAX_EXPONENT: i32 = 39;
    const NUMERIC: NumericType = NumericType::Single;

    const ZERO: Self = 0.0;
    const INFINITY: Self = f32::INFINITY;
    const NAN: Self = f32::NAN;

    fn negate(self) -> Self {
        -self
    }

    fn from_decimal(number: &NumberBuffer) -> Option<Self> {
        decimal_literal(number).parse().ok()
    }
}

impl FloatTarget for f16 {
    const BUFFER_DIGITS: usize = 22;
    const MIN_EXPONENT: i32 = -8;
    const MAX_EXPONENT: i32 = 5;
    const NUMERIC: NumericType = NumericType::Half;

    const ZERO: Self = f16::ZERO;
    const INFINITY: Self = f16::INFINITY;
    const NAN: Self = f16::NAN;

    fn negate(self) -> Self {
        -self
    }

    fn from_decimal(number: &NumberBuffer) -> Option<Self> {
        let wide: f64 = decimal_literal(number).parse().ok()?;
        let nearest = f16::from_f64(wide);

        // Rounding through f64 only goes wrong when `wide` sits exactly on an
        // f16 midpoint; then the exact digits decide the direction.
        let nearest_value = half_magnitude(nearest);
        let neighbor = if nearest_value < wide {
            f16::from_bits(nearest.to_bits() + 1)
        } else if nearest_value > wide {
            f16::from_bits(nearest.to_bits().checked_sub(1)?)
        } else {
            return Some(nearest);
        };
        if (nearest_value + half_magnitude(neighbor)) / 2.0 != wide {
            return Some(nearest);
        }

        let (lower, upper) = if nearest_value < wide {
            (nearest, neighbor)
        } else {
            (neighbor, nearest)
        };
        match compare_with_f64(number, wide) {
            Ordering::Greater => Some(upper),
            Ordering::Less => Some(lower),
            Ordering::Equal => Some(nearest),
        }
    }
}

/// Value of a positive f16 as f64, with infinity standing for 2^16 so the
/// midpoint above the largest finite value can be found
fn half_magnitude(value: f16) -> f64 {
    if value.is_infinite() {
        65536.0
    } else {
        value.to_f64()
    }
}

/// Compare the exact decimal in `number` with an f64
fn compare_with_f64(number: &NumberBuffer, value: f64) -> Ordering {
    // Forty fractional digits print any f16 midpoint exactly
    let printed = format!("{:.40e}", value);
    let Some((mantissa, exponent)) = printed.split_once('e') else {
        return Ordering::Equal;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return Ordering::Equal;
    };
    let other_digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let other_digits = other_digits.trim_end_matches('0');
    let other_scale = exponent + 1;

    let digits = number.digits_str().trim_end_matches('0');
    match number.scale().cmp(&other_scale) {
        Ordering::Equal => {}
        unequal => return unequal,
    }

    let length = digits.len().max(other_digits.len());
    let padded = |s: &str| s.bytes().chain(std::iter::repeat(b'0')).take(length).collect::<Vec<u8>>();
    match padded(digits).cmp(&padded(other_digits)) {
        Ordering::Equal if number.has_non_zero_tail() => Ordering::Greater,
        ordering => ordering,
    }
}

/// Convert a tokenized number, handling zero, underflow and overflow by scale
pub(crate) fn number_to_float<F: FloatTarget>(number: &NumberBuffer) -> Option<F> {
    let magnitude = if number.digits_count() == 0 || number.scale() < F::MIN_EXPONENT {
        F::ZERO
    } else if number.scale() > F::MAX_EXPONENT {
        F::INFINITY
    } else {
        F::from_decimal(number)?
    };
    Some(if number.is_negative() { magnitude.negate() } else { magnitude })
}

/// Match the culture's infinity and NaN symbols after the grammar failed.
///
/// Matching is case-insensitive on the trimmed text and also accepts the
/// positive or negative sign in front of the infinity or NaN symbol.
pub(crate) fn parse_special_symbol<F: FloatTarget>(text: &str, info: &NumberFormatInfo) -> Option<F> {
    let text = text.trim();

    if eq_ignore_case(text, &info.positive_infinity_symbol) {
        return Some(F::INFINITY);
    }
    if eq_ignore_case(text, &info.negative_infinity_symbol) {
        return Some(F::INFINITY.negate());
    }
    if eq_ignore_case(text, &info.nan_symbol) {
        return Some(F::NAN);
    }

    if let Some(rest) = strip_prefix_ignore_case(text, &info.positive_sign) {
        if eq_ignore_case(rest, &info.positive_infinity_symbol) {
            return Some(F::INFINITY);
        }
        if eq_ignore_case(rest, &info.nan_symbol) {
            return Some(F::NAN);
        }
    } else if let Some(rest) = strip_prefix_ignore_case(text, &info.negative_sign) {
        // A signed NaN is still the one NaN
        if eq_ignore_case(rest, &info.nan_symbol) {
            return Some(F::NAN);
        }
    } else if info.allow_hyphen_during_parsing() {
        if let Some(rest) = text.strip_prefix('-') {
            if eq_ignore_case(rest, &info.nan_symbol) {
                return Some(F::NAN);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::buffer::NumberBufferKind;
    use crate::parser::tokenizer::try_string_to_number;
    use crate::types::NumberStyles;

    fn float<F: FloatTarget>(text: &str) -> Option<F> {
        let mut number = NumberBuffer::new(NumberBufferKind::FloatingPoint, F::BUFFER_DIGITS);
        if !try_string_to_number(text, NumberStyles::FLOAT, &mut number, NumberFormatInfo::invariant()) {
            return None;
        }
        number_to_float(&number)
    }

    #[test]
    fn doubles() {
        assert_eq!(float::<f64>("1.5"), Some(1.5));
        assert_eq!(float::<f64>("-0.0").map(f64::to_bits), Some((-0.0f64).to_bits()));
        assert_eq!(float::<f64>("1e400"), Some(f64::INFINITY));
        assert_eq!(float::<f64>("-1e400"), Some(f64::NEG_INFINITY));
        assert_eq!(float::<f64>("1e-400"), Some(0.0));
        assert_eq!(float::<f64>("1.7976931348623157e308"), Some(f64::MAX));
        assert_eq!(float::<f64>("4.9406564584124654e-324"), Some(f64::from_bits(1)));
    }

    #[test]
    fn singles() {
        assert_eq!(float::<f32>("3.4028235e38"), Some(f32::MAX));
        assert_eq!(float::<f32>("3.5e38"), Some(f32::INFINITY));
        assert_eq!(float::<f32>("0.1"), Some(0.1f32));
    }

    #[test]
    fn sticky_tail_breaks_ties() {
        // 2^53 + 1 is a tie between 2^53 and 2^53 + 2; any further digit rounds up
        let tie = format!("9007199254740993{}", "0".repeat(800));
        assert_eq!(float::<f64>(&tie), Some(9007199254740992.0));
        let above = format!("9007199254740993{}1", "0".repeat(800));
        assert_eq!(float::<f64>(&above), Some(9007199254740994.0));
    }

    #[test]
    fn halves() {
        assert_eq!(float::<f16>("1"), Some(f16::ONE));
        assert_eq!(float::<f16>("65504"), Some(f16::MAX));
        assert_eq!(float::<f16>("65520"), Some(f16::INFINITY));
        assert_eq!(float::<f16>("65519.99"), Some(f16::MAX));
        assert_eq!(float::<f16>("1e6"), Some(f16::INFINITY));
        assert_eq!(float::<f16>("1e-9"), Some(f16::ZERO));
    }

    #[test]
    fn half_midpoint_uses_exact_digits() {
        // 1 + 2^-11 is the midpoint between 1 and the next f16; it ties to 1
        assert_eq!(float::<f16>("1.00048828125"), Some(f16::ONE));
        // Slightly above the midpoint, but equal to it after rounding to f64
        let above = "1.000488281250000000001";
        assert_eq!(float::<f16>(above), Some(f16::from_bits(0x3C01)));
        let below = "1.000488281249999999999";
        assert_eq!(float::<f16>(below), Some(f16::ONE));
    }

    #[test]
    fn special_symbols() {
        let info = NumberFormatInfo::invariant();
        assert_eq!(parse_special_symbol::<f64>(" infinity ", info), Some(f64::INFINITY));
        assert_eq!(parse_special_symbol::<f64>("-INFINITY", info), Some(f64::NEG_INFINITY));
        assert_eq!(parse_special_symbol::<f64>("+Infinity", info), Some(f64::INFINITY));
        assert!(parse_special_symbol::<f64>("nan", info).is_some_and(f64::is_nan));
        assert_eq!(parse_special_symbol::<f64>("-NaN", info).map(f64::to_bits), Some(f64::NAN.to_bits()));
        assert_eq!(parse_special_symbol::<f32>("-nan", info).map(f32::to_bits), Some(f32::NAN.to_bits()));
        assert_eq!(parse_special_symbol::<f64>("inf", info), None);
    }
}
