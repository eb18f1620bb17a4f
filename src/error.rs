//! Error types for number parsing and date/time formatting

use crate::types::{NumberStyles, NumericType};

/// Error returned by the raising parse entry points
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberParseError {
    /// The text does not satisfy the grammar of the requested styles
    #[error("The input string '{input}' was not in a correct format.")]
    Format { input: String },

    /// The text is well formed but does not fit the target type
    #[error("Value was either too large or too small for {}.", .target.with_article())]
    Overflow { target: NumericType },

    /// The style combination cannot be used with the target type
    #[error("number styles {styles:?} are not supported when parsing {target}")]
    InvalidStyles {
        styles: NumberStyles,
        target: NumericType,
    },
}

/// Error raised while expanding or interpreting a date/time pattern
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Generic malformed pattern, or a field not allowed in this context
    #[error("input string was not in a correct format")]
    InvalidString,

    /// A quoted literal was opened but never closed
    #[error("cannot find a matching quote character for the character '{0}'")]
    UnterminatedQuote(char),

    /// A `\` ends the pattern
    #[error("the pattern ends with an unescaped '\\'")]
    TrailingEscape,

    /// A `%` ends the pattern, or `%%` appears
    #[error("'%' must be followed by a single pattern character other than '%'")]
    InvalidPercent,

    /// `f`/`F` run longer than seven characters
    #[error("sub-second fraction of {0} digits exceeds the maximum of 7")]
    FractionTooLong(usize),

    /// Single-character pattern that names no predefined format
    #[error("'{0}' is not a predefined date/time format")]
    UnknownSpecifier(char),

    /// Predefined format that cannot be applied to an offset-bearing value
    #[error("format '{0}' is not supported for values with an explicit offset")]
    OffsetNotSupported(char),

    /// The date lies outside the range of the calendar or of years 1..=9999
    #[error("the date is outside the range supported by the calendar")]
    OutOfCalendarRange,

    /// Caller-supplied destination cannot hold the output
    #[error("destination holds {available} bytes but {needed} are required")]
    BufferTooSmall { needed: usize, available: usize },
}
