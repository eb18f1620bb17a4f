//! Culture-aware number parsing
//!
//! This module turns text into integers, decimals and binary floats
//! according to a [`NumberStyles`] bitset and a [`NumberFormatInfo`].
//! The main entry points are [`try_parse`] and [`parse`].
//!
//! Integer styles within [`NumberStyles::INTEGER`] and
//! [`NumberStyles::HEX_NUMBER`] take dedicated fast paths; everything else
//! goes through the general grammar, which produces a decimal digit buffer
//! that a type-specific converter then turns into the target value.

mod buffer;
mod chars;
mod decimal;
mod float;
mod integer;
mod tokenizer;

use half::f16;
use rust_decimal::Decimal;

use buffer::{NumberBuffer, NumberBufferKind};
use float::FloatTarget;
use integer::IntegerTarget;

use crate::error::NumberParseError;
use crate::locale::NumberFormatInfo;
use crate::types::{NumberStyles, NumericType, ParseResult};

/// Types that can be parsed from culture-formatted text
pub trait ParseNumber: Sized {
    /// Name of the type in error messages
    const NUMERIC: NumericType;

    /// Whether `styles` may be used with this type
    fn supports_styles(styles: NumberStyles) -> bool;

    /// Parse without raising; invalid styles yield `Failed`
    fn try_parse_with(text: &str, styles: NumberStyles, info: &NumberFormatInfo) -> ParseResult<Self>;
}

fn try_parse_integer<T: IntegerTarget>(
    text: &str,
    styles: NumberStyles,
    info: &NumberFormatInfo,
) -> ParseResult<T> {
    if styles.is_subset_of(NumberStyles::INTEGER) {
        return integer::parse_integer_style(text, styles, info);
    }
    if styles.contains(NumberStyles::ALLOW_HEX_SPECIFIER) {
        return integer::parse_hex_style(text, styles);
    }

    let mut number = NumberBuffer::new(NumberBufferKind::Integer, T::PRECISION);
    if !tokenizer::try_string_to_number(text, styles, &mut number, info) {
        return ParseResult::Failed;
    }
    match integer::number_to_integer(&number) {
        Some(value) => ParseResult::Ok(value),
        None => ParseResult::Overflow,
    }
}

macro_rules! parse_integer {
    ($($ty:ty),*) => {$(
        impl ParseNumber for $ty {
            const NUMERIC: NumericType = <$ty as IntegerTarget>::NUMERIC;

            fn supports_styles(styles: NumberStyles) -> bool {
                styles.is_valid_for_integer()
            }

            fn try_parse_with(text: &str, styles: NumberStyles, info: &NumberFormatInfo) -> ParseResult<Self> {
                if !Self::supports_styles(styles) {
                    tracing::debug!(?styles, target = %<Self as ParseNumber>::NUMERIC, "unsupported number styles");
                    return ParseResult::Failed;
                }
                try_parse_integer(text, styles, info)
            }
        }
    )*};
}

parse_integer!(i32, i64, i128, u32, u64, u128);

impl ParseNumber for Decimal {
    const NUMERIC: NumericType = NumericType::Decimal;

    fn supports_styles(styles: NumberStyles) -> bool {
        styles.is_valid_for_fraction()
    }

    fn try_parse_with(text: &str, styles: NumberStyles, info: &NumberFormatInfo) -> ParseResult<Self> {
        if !Self::supports_styles(styles) {
            tracing::debug!(?styles, target = %Self::NUMERIC, "unsupported number styles");
            return ParseResult::Failed;
        }
        let mut number = NumberBuffer::new(NumberBufferKind::Decimal, decimal::DECIMAL_PRECISION as usize + 1);
        if !tokenizer::try_string_to_number(text, styles, &mut number, info) {
            return ParseResult::Failed;
        }
        match decimal::number_to_decimal(&number) {
            Some(value) => ParseResult::Ok(value),
            None => ParseResult::Overflow,
        }
    }
}

fn try_parse_float<F: FloatTarget>(text: &str, styles: NumberStyles, info: &NumberFormatInfo) -> ParseResult<F> {
    if !styles.is_valid_for_fraction() {
        tracing::debug!(?styles, target = %F::NUMERIC, "unsupported number styles");
        return ParseResult::Failed;
    }
    let mut number = NumberBuffer::new(NumberBufferKind::FloatingPoint, F::BUFFER_DIGITS);
    let converted = if tokenizer::try_string_to_number(text, styles, &mut number, info) {
        float::number_to_float(&number)
    } else {
        float::parse_special_symbol(text, info)
    };
    // Out-of-range magnitudes become infinities, never Overflow
    match converted {
        Some(value) => ParseResult::Ok(value),
        None => ParseResult::Failed,
    }
}

macro_rules! parse_float {
    ($($ty:ty),*) => {$(
        impl ParseNumber for $ty {
            const NUMERIC: NumericType = <$ty as FloatTarget>::NUMERIC;

            fn supports_styles(styles: NumberStyles) -> bool {
                styles.is_valid_for_fraction()
            }

            fn try_parse_with(text: &str, styles: NumberStyles, info: &NumberFormatInfo) -> ParseResult<Self> {
                try_parse_float(text, styles, info)
            }
        }
    )*};
}

parse_float!(f64, f32, f16);

/// Parse `text` without raising
///
/// # Arguments
/// * `text` - The text to parse
/// * `styles` - Conventions the text may use
/// * `info` - Culture symbols
///
/// # Returns
/// `Ok(value)`, `Failed` for grammar mismatches, or `Overflow` when the
/// value does not fit `T`
///
/// # Examples
/// ```
/// use culture_format::{NumberFormatInfo, NumberStyles, ParseResult};
/// use culture_format::parser::try_parse;
///
/// let info = NumberFormatInfo::invariant();
/// assert_eq!(try_parse::<i32>("  -42 ", NumberStyles::INTEGER, info), ParseResult::Ok(-42));
/// assert_eq!(try_parse::<u32>("FF", NumberStyles::HEX_NUMBER, info), ParseResult::Ok(255));
/// assert_eq!(try_parse::<i32>("3000000000", NumberStyles::INTEGER, info), ParseResult::Overflow);
/// ```
pub fn try_parse<T: ParseNumber>(text: &str, styles: NumberStyles, info: &NumberFormatInfo) -> ParseResult<T> {
    T::try_parse_with(text, styles, info)
}

/// Parse `text`, reporting failures as [`NumberParseError`]
///
/// # Examples
/// ```
/// use culture_format::{NumberFormatInfo, NumberStyles};
/// use culture_format::parser::parse;
///
/// let info = NumberFormatInfo::invariant();
/// let err = parse::<i32>("12a", NumberStyles::INTEGER, info).unwrap_err();
/// assert_eq!(err.to_string(), "The input string '12a' was not in a correct format.");
/// ```
pub fn parse<T: ParseNumber>(
    text: &str,
    styles: NumberStyles,
    info: &NumberFormatInfo,
) -> Result<T, NumberParseError> {
    if !T::supports_styles(styles) {
        return Err(NumberParseError::InvalidStyles {
            styles,
            target: T::NUMERIC,
        });
    }
    match T::try_parse_with(text, styles, info) {
        ParseResult::Ok(value) => Ok(value),
        ParseResult::Failed => Err(NumberParseError::Format {
            input: text.to_string(),
        }),
        ParseResult::Overflow => Err(NumberParseError::Overflow { target: T::NUMERIC }),
    }
}

/// Parse with the default styles of `T`: [`NumberStyles::INTEGER`] for
/// integers, [`NumberStyles::NUMBER`] for decimals and
/// `FLOAT | ALLOW_THOUSANDS` for binary floats
pub fn parse_default<T: ParseNumber + DefaultStyles>(
    text: &str,
    info: &NumberFormatInfo,
) -> Result<T, NumberParseError> {
    parse(text, T::DEFAULT_STYLES, info)
}

/// Styles used when the caller does not pick any
pub trait DefaultStyles {
    const DEFAULT_STYLES: NumberStyles;
}

macro_rules! default_styles {
    ($styles:expr => $($ty:ty),*) => {$(
        impl DefaultStyles for $ty {
            const DEFAULT_STYLES: NumberStyles = $styles;
        }
    )*};
}

default_styles!(NumberStyles::INTEGER => i32, i64, i128, u32, u64, u128);
default_styles!(NumberStyles::NUMBER => Decimal);
default_styles!(NumberStyles::from_bits(NumberStyles::FLOAT.bits() | NumberStyles::ALLOW_THOUSANDS.bits()) => f64, f32, f16);
