//! Type definitions shared by the number parser and the date/time formatter
//!
//! This module defines the parse style flags, the parse outcome types and the
//! date/time value that the formatter consumes.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike};

/// Bitset selecting which textual conventions a parse call accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NumberStyles(u32);

impl NumberStyles {
    /// No leading/trailing decoration, digits only
    pub const NONE: Self = Self(0);
    /// Whitespace (U+0009..U+000D, U+0020) before the number
    pub const ALLOW_LEADING_WHITE: Self = Self(0x0001);
    /// Whitespace after the number
    pub const ALLOW_TRAILING_WHITE: Self = Self(0x0002);
    /// A positive or negative sign before the digits
    pub const ALLOW_LEADING_SIGN: Self = Self(0x0004);
    /// A positive or negative sign after the digits
    pub const ALLOW_TRAILING_SIGN: Self = Self(0x0008);
    /// `(` ... `)` around a negative number
    pub const ALLOW_PARENTHESES: Self = Self(0x0010);
    /// A decimal separator
    pub const ALLOW_DECIMAL_POINT: Self = Self(0x0020);
    /// Group separators between integral digits
    pub const ALLOW_THOUSANDS: Self = Self(0x0040);
    /// `E`/`e` followed by an optionally signed exponent
    pub const ALLOW_EXPONENT: Self = Self(0x0080);
    /// The locale currency symbol
    pub const ALLOW_CURRENCY_SYMBOL: Self = Self(0x0100);
    /// Base-16 digits, no prefix
    pub const ALLOW_HEX_SPECIFIER: Self = Self(0x0200);

    /// Leading/trailing white and leading sign
    pub const INTEGER: Self = Self(0x0007);
    /// Leading/trailing white and hex digits
    pub const HEX_NUMBER: Self = Self(0x0203);
    /// Integer plus trailing sign, decimal point and thousands
    pub const NUMBER: Self = Self(0x006F);
    /// Leading/trailing white, leading sign, decimal point and exponent
    pub const FLOAT: Self = Self(0x00A7);
    /// Number plus parentheses and currency symbol
    pub const CURRENCY: Self = Self(0x017F);
    /// Everything except hex
    pub const ANY: Self = Self(0x01FF);

    /// Raw flag bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits; unknown bits are kept so validation can reject them
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// True if every flag of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no flag outside `other` is set
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Styles accepted for integer targets: known flags, and hex only with
    /// the hex-compatible subset
    pub(crate) const fn is_valid_for_integer(self) -> bool {
        if !self.is_subset_of(Self(Self::ANY.0 | Self::ALLOW_HEX_SPECIFIER.0)) {
            return false;
        }
        !self.contains(Self::ALLOW_HEX_SPECIFIER) || self.is_subset_of(Self::HEX_NUMBER)
    }

    /// Styles accepted for decimal and floating-point targets
    pub(crate) const fn is_valid_for_fraction(self) -> bool {
        self.is_subset_of(Self::ANY)
    }
}

impl BitOr for NumberStyles {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for NumberStyles {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for NumberStyles {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Outcome class of a parse call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsingStatus {
    /// The text matched the grammar and the value fits
    Ok,
    /// The text does not match the grammar for the requested styles
    Failed,
    /// The text is well formed but the magnitude exceeds the target type
    Overflow,
}

/// Non-failing parse result carrying the value on success
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseResult<T> {
    /// Parsed value
    Ok(T),
    /// Grammar mismatch
    Failed,
    /// Magnitude out of range
    Overflow,
}

impl<T> ParseResult<T> {
    /// The status tag of this result
    pub fn status(&self) -> ParsingStatus {
        match self {
            ParseResult::Ok(_) => ParsingStatus::Ok,
            ParseResult::Failed => ParsingStatus::Failed,
            ParseResult::Overflow => ParsingStatus::Overflow,
        }
    }

    /// True for `ParseResult::Ok`
    pub fn is_ok(&self) -> bool {
        matches!(self, ParseResult::Ok(_))
    }

    /// The value, if parsing succeeded
    pub fn ok(self) -> Option<T> {
        match self {
            ParseResult::Ok(value) => Some(value),
            _ => None,
        }
    }

    /// Map the carried value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            ParseResult::Ok(value) => ParseResult::Ok(f(value)),
            ParseResult::Failed => ParseResult::Failed,
            ParseResult::Overflow => ParseResult::Overflow,
        }
    }
}

/// Target types of the number parser, used in overflow messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    Int32,
    Int64,
    Int128,
    UInt32,
    UInt64,
    UInt128,
    Decimal,
    Half,
    Single,
    Double,
}

impl NumericType {
    /// Type name prefixed with its indefinite article, e.g. "an Int32"
    pub fn with_article(self) -> String {
        let name = self.to_string();
        let article = if name.starts_with('I') {
            "an"
        } else {
            "a"
        };
        format!("{article} {name}")
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumericType::Int32 => "Int32",
            NumericType::Int64 => "Int64",
            NumericType::Int128 => "Int128",
            NumericType::UInt32 => "UInt32",
            NumericType::UInt64 => "UInt64",
            NumericType::UInt128 => "UInt128",
            NumericType::Decimal => "Decimal",
            NumericType::Half => "Half",
            NumericType::Single => "Single",
            NumericType::Double => "Double",
        };
        f.write_str(name)
    }
}

/// How a date/time value relates to UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateTimeKind {
    /// No time zone information
    #[default]
    Unspecified,
    /// Coordinated universal time
    Utc,
    /// Local time of the machine
    Local,
}

/// Number of 100-nanosecond ticks in one second
pub const TICKS_PER_SECOND: i64 = 10_000_000;
/// Number of 100-nanosecond ticks in one day
pub const TICKS_PER_DAY: i64 = TICKS_PER_SECOND * 86_400;

/// A wall-clock date and time in years 1..=9999 with 100 ns resolution,
/// tagged with its [`DateTimeKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeValue {
    naive: NaiveDateTime,
    kind: DateTimeKind,
}

impl DateTimeValue {
    /// Wrap a chrono value. Returns `None` outside years 1..=9999.
    /// Sub-tick nanoseconds are truncated.
    pub fn new(naive: NaiveDateTime, kind: DateTimeKind) -> Option<Self> {
        if !(1..=9999).contains(&naive.year()) {
            return None;
        }
        let nanos = naive.nanosecond() % 1_000_000_000;
        let naive = naive.with_nanosecond(nanos - nanos % 100)?;
        Some(Self { naive, kind })
    }

    /// Build from calendar fields plus sub-second ticks (0..10_000_000)
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        ticks: u32,
        kind: DateTimeKind,
    ) -> Option<Self> {
        if ticks as i64 >= TICKS_PER_SECOND {
            return None;
        }
        let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_nano_opt(
            hour,
            minute,
            second,
            ticks * 100,
        )?;
        Self::new(naive, kind)
    }

    /// Build from a tick count since 0001-01-01T00:00:00
    pub fn from_ticks(ticks: i64, kind: DateTimeKind) -> Option<Self> {
        if ticks < 0 {
            return None;
        }
        let epoch = NaiveDate::from_ymd_opt(1, 1, 1)?.and_hms_opt(0, 0, 0)?;
        let seconds = ticks / TICKS_PER_SECOND;
        let remainder = ticks % TICKS_PER_SECOND;
        let naive = epoch
            .checked_add_signed(Duration::seconds(seconds))?
            .checked_add_signed(Duration::nanoseconds(remainder * 100))?;
        Self::new(naive, kind)
    }

    /// UTC value
    pub fn utc(naive: NaiveDateTime) -> Option<Self> {
        Self::new(naive, DateTimeKind::Utc)
    }

    /// Local-time value
    pub fn local(naive: NaiveDateTime) -> Option<Self> {
        Self::new(naive, DateTimeKind::Local)
    }

    /// Value without zone information
    pub fn unspecified(naive: NaiveDateTime) -> Option<Self> {
        Self::new(naive, DateTimeKind::Unspecified)
    }

    /// The wall-clock value
    pub fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    /// The kind tag
    pub fn kind(&self) -> DateTimeKind {
        self.kind
    }

    /// The same wall-clock value with another kind
    pub fn with_kind(self, kind: DateTimeKind) -> Self {
        Self { kind, ..self }
    }

    /// Ticks since 0001-01-01T00:00:00
    pub fn ticks(&self) -> i64 {
        let days = self.naive.date().num_days_from_ce() as i64 - 1;
        days * TICKS_PER_DAY
            + self.naive.num_seconds_from_midnight() as i64 * TICKS_PER_SECOND
            + self.sub_second_ticks() as i64
    }

    /// Ticks within the current second, 0..10_000_000
    pub fn sub_second_ticks(&self) -> u32 {
        (self.naive.nanosecond() % 1_000_000_000) / 100
    }

    /// True for values on 0001-01-01, which callers use as "time of day only"
    pub fn is_time_of_day_only(&self) -> bool {
        self.ticks() < TICKS_PER_DAY
    }

    /// Shift the wall clock by `-offset`, keeping the kind; `None` if the
    /// result leaves years 1..=9999
    pub(crate) fn checked_sub_offset(&self, offset: FixedOffset) -> Option<Self> {
        let naive = self
            .naive
            .checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))?;
        Self::new(naive, self.kind)
    }
}
