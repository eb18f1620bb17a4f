//! Integer targets: fast paths for the common style sets and the
//! buffer-to-integer converter used after the general grammar

use super::buffer::NumberBuffer;
use super::chars::{is_white_byte, trailing_zeros};
use crate::locale::NumberFormatInfo;
use crate::types::{NumberStyles, NumericType, ParseResult};

/// Unsigned accumulator matching the width of an integer target
pub(crate) trait Magnitude: Copy + Default + PartialEq {
    /// `self * 10 + digit`, or `None` once the result would pass `limit`
    fn push_digit(self, digit: u8, limit: Self) -> Option<Self>;
}

macro_rules! magnitude {
    ($($ty:ty),*) => {$(
        impl Magnitude for $ty {
            fn push_digit(self, digit: u8, limit: Self) -> Option<Self> {
                let digit = digit as $ty;
                if self > limit / 10 || (self == limit / 10 && digit > limit % 10) {
                    None
                } else {
                    Some(self * 10 + digit)
                }
            }
        }
    )*};
}

magnitude!(u32, u64, u128);

/// Per-width parameters of an integer target
///
/// Magnitudes are accumulated in the unsigned type of the same width and
/// checked against [`max_magnitude`](Self::max_magnitude) before every
/// multiply-add.
pub(crate) trait IntegerTarget: Copy {
    type Magnitude: Magnitude;

    /// Width in bits
    const BITS: u32;
    /// Whether negative values exist
    const SIGNED: bool;
    /// Maximum number of decimal digits
    const PRECISION: usize;
    /// Name used in overflow messages
    const NUMERIC: NumericType;

    /// Largest magnitude representable with the given sign
    fn max_magnitude(negative: bool) -> Self::Magnitude;

    /// Build from a magnitude already checked against `max_magnitude`
    fn from_magnitude(magnitude: Self::Magnitude, negative: bool) -> Self;

    /// Reinterpret the low `BITS` bits
    fn from_bits(bits: u128) -> Self;
}

macro_rules! signed_target {
    ($ty:ty, $unsigned:ty, $precision:expr, $numeric:expr) => {
        impl IntegerTarget for $ty {
            type Magnitude = $unsigned;

            const BITS: u32 = <$ty>::BITS;
            const SIGNED: bool = true;
            const PRECISION: usize = $precision;
            const NUMERIC: NumericType = $numeric;

            fn max_magnitude(negative: bool) -> $unsigned {
                // MIN has one more unit of magnitude than MAX
                <$ty>::MAX as $unsigned + negative as $unsigned
            }

            fn from_magnitude(magnitude: $unsigned, negative: bool) -> Self {
                let value = magnitude as $ty;
                if negative { value.wrapping_neg() } else { value }
            }

            fn from_bits(bits: u128) -> Self {
                bits as $unsigned as $ty
            }
        }
    };
}

macro_rules! unsigned_target {
    ($ty:ty, $precision:expr, $numeric:expr) => {
        impl IntegerTarget for $ty {
            type Magnitude = $ty;

            const BITS: u32 = <$ty>::BITS;
            const SIGNED: bool = false;
            const PRECISION: usize = $precision;
            const NUMERIC: NumericType = $numeric;

            fn max_magnitude(negative: bool) -> $ty {
                if negative { 0 } else { <$ty>::MAX }
            }

            fn from_magnitude(magnitude: $ty, _negative: bool) -> Self {
                magnitude
            }

            fn from_bits(bits: u128) -> Self {
                bits as $ty
            }
        }
    };
}

signed_target!(i32, u32, 10, NumericType::Int32);
signed_target!(i64, u64, 19, NumericType::Int64);
signed_target!(i128, u128, 39, NumericType::Int128);
unsigned_target!(u32, 10, NumericType::UInt32);
unsigned_target!(u64, 20, NumericType::UInt64);
unsigned_target!(u128, 39, NumericType::UInt128);

/// After the digits: optional white (if allowed), then only NUL padding
fn accept_trailing(text: &str, mut index: usize, styles: NumberStyles) -> bool {
    let bytes = text.as_bytes();
    if index < bytes.len() && is_white_byte(bytes[index]) {
        if !styles.contains(NumberStyles::ALLOW_TRAILING_WHITE) {
            return false;
        }
        while index < bytes.len() && is_white_byte(bytes[index]) {
            index += 1;
        }
    }
    index == bytes.len() || trailing_zeros(text, index)
}

/// Fast path for styles within [`NumberStyles::INTEGER`]
///
/// Format errors take precedence over overflow: digits past the overflow
/// point are still consumed and the trailing characters still checked.
pub(crate) fn parse_integer_style<T: IntegerTarget>(
    text: &str,
    styles: NumberStyles,
    info: &NumberFormatInfo,
) -> ParseResult<T> {
    let bytes = text.as_bytes();
    let mut index = 0;

    if styles.contains(NumberStyles::ALLOW_LEADING_WHITE) {
        while index < bytes.len() && is_white_byte(bytes[index]) {
            index += 1;
        }
    }
    if index == bytes.len() {
        return ParseResult::Failed;
    }

    let mut negative = false;
    if styles.contains(NumberStyles::ALLOW_LEADING_SIGN) {
        let rest = &text[index..];
        let consumed = if info.has_invariant_number_signs() {
            match bytes[index] {
                b'-' => {
                    negative = true;
                    1
                }
                b'+' => 1,
                _ => 0,
            }
        } else if info.allow_hyphen_during_parsing() && bytes[index] == b'-' {
            negative = true;
            1
        } else if !info.positive_sign.is_empty() && rest.starts_with(info.positive_sign.as_str()) {
            info.positive_sign.len()
        } else if !info.negative_sign.is_empty() && rest.starts_with(info.negative_sign.as_str()) {
            negative = true;
            info.negative_sign.len()
        } else {
            0
        };
        index += consumed;
        if consumed > 0 && index == bytes.len() {
            return ParseResult::Failed;
        }
    }

    if index == bytes.len() || !bytes[index].is_ascii_digit() {
        return ParseResult::Failed;
    }
    while index < bytes.len() && bytes[index] == b'0' {
        index += 1;
    }

    let limit = T::max_magnitude(negative);
    let mut magnitude = T::Magnitude::default();
    let mut overflow = false;
    while index < bytes.len() && bytes[index].is_ascii_digit() {
        if !overflow {
            match magnitude.push_digit(bytes[index] - b'0', limit) {
                Some(next) => magnitude = next,
                None => overflow = true,
            }
        }
        index += 1;
    }

    if !accept_trailing(text, index, styles) {
        return ParseResult::Failed;
    }
    if overflow {
        return ParseResult::Overflow;
    }
    ParseResult::Ok(T::from_magnitude(magnitude, negative))
}

/// Fast path for styles within [`NumberStyles::HEX_NUMBER`]
///
/// Signed targets take the two's-complement reading of the bits, so
/// "FFFFFFFF" is -1 for `i32`.
pub(crate) fn parse_hex_style<T: IntegerTarget>(text: &str, styles: NumberStyles) -> ParseResult<T> {
    let bytes = text.as_bytes();
    let mut index = 0;

    if styles.contains(NumberStyles::ALLOW_LEADING_WHITE) {
        while index < bytes.len() && is_white_byte(bytes[index]) {
            index += 1;
        }
    }
    if index == bytes.len() || !bytes[index].is_ascii_hexdigit() {
        return ParseResult::Failed;
    }
    while index < bytes.len() && bytes[index] == b'0' {
        index += 1;
    }

    let max_digits = (T::BITS / 4) as usize;
    let mut bits = 0u128;
    let mut count = 0usize;
    while index < bytes.len() && bytes[index].is_ascii_hexdigit() {
        if count < max_digits {
            let digit = (bytes[index] as char).to_digit(16).unwrap_or(0) as u128;
            bits = (bits << 4) | digit;
        }
        count += 1;
        index += 1;
    }

    if !accept_trailing(text, index, styles) {
        return ParseResult::Failed;
    }
    if count > max_digits {
        return ParseResult::Overflow;
    }
    ParseResult::Ok(T::from_bits(bits))
}

/// Convert a tokenized number to an integer.
///
/// Fails when the value has a fractional part, needs more digits than the
/// type has, or does not fit.
pub(crate) fn number_to_integer<T: IntegerTarget>(number: &NumberBuffer) -> Option<T> {
    let scale = number.scale();
    let negative = number.is_negative();
    if scale > T::PRECISION as i32 || scale < number.digits_count() as i32 {
        return None;
    }
    if !T::SIGNED && negative {
        return None;
    }

    let limit = T::max_magnitude(negative);
    let mut magnitude = T::Magnitude::default();
    for index in 0..scale as usize {
        magnitude = magnitude.push_digit(number.digit(index), limit)?;
    }
    Some(T::from_magnitude(magnitude, negative))
}
