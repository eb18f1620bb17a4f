//! Predefined single-letter formats
//!
//! A specifier expands to a custom pattern taken from the culture data. Some
//! specifiers also adjust what gets formatted: the culture-invariant ones
//! swap in invariant data, `r`/`R`/`u` shift an offset-bearing value to UTC
//! and `U` converts to universal time on the Gregorian calendar.

use std::borrow::Cow;

use chrono::FixedOffset;

use super::clock;
use crate::calendar::Calendar;
use crate::error::FormatError;
use crate::locale::{
    DateTimeFormatInfo, RFC1123_PATTERN, ROUND_TRIP_PATTERN, SORTABLE_PATTERN,
    UNIVERSAL_SORTABLE_PATTERN,
};
use crate::types::DateTimeValue;

/// Result of expanding a specifier: the pattern plus the value and culture
/// data it must be applied to
#[derive(Debug)]
pub(crate) struct ExpandedFormat<'a> {
    pub pattern: String,
    pub value: DateTimeValue,
    pub info: Cow<'a, DateTimeFormatInfo>,
}

/// Custom pattern a specifier stands for in `info`
pub(crate) fn real_format(specifier: char, info: &DateTimeFormatInfo) -> Result<String, FormatError> {
    let pattern = match specifier {
        'd' => info.short_date_pattern().to_string(),
        'D' => info.long_date_pattern().to_string(),
        'f' => format!("{} {}", info.long_date_pattern(), info.short_time_pattern()),
        'F' | 'U' => info.full_date_time_pattern(),
        'g' => info.general_short_time_pattern(),
        'G' => info.general_long_time_pattern(),
        'm' | 'M' => info.month_day_pattern.clone(),
        'o' | 'O' => ROUND_TRIP_PATTERN.to_string(),
        'r' | 'R' => RFC1123_PATTERN.to_string(),
        's' => SORTABLE_PATTERN.to_string(),
        't' => info.short_time_pattern().to_string(),
        'T' => info.long_time_pattern().to_string(),
        'u' => UNIVERSAL_SORTABLE_PATTERN.to_string(),
        'y' | 'Y' => info.year_month_pattern().to_string(),
        other => return Err(FormatError::UnknownSpecifier(other)),
    };
    Ok(pattern)
}

/// Expand a predefined specifier
///
/// # Arguments
/// * `specifier` - One of `dDfFgGmMoOrRstTuUyY`
/// * `value` - The value about to be formatted
/// * `info` - Culture data requested by the caller
/// * `offset` - Explicit UTC offset of an offset-bearing value
///
/// # Returns
/// The pattern with the (possibly converted) value and the culture data to
/// use, or an error for unknown specifiers and impossible conversions
pub(crate) fn expand_predefined_format<'a>(
    specifier: char,
    value: &DateTimeValue,
    info: &'a DateTimeFormatInfo,
    offset: Option<FixedOffset>,
) -> Result<ExpandedFormat<'a>, FormatError> {
    let mut value = *value;
    let mut info = Cow::Borrowed(info);

    match specifier {
        'o' | 'O' | 's' => {
            info = Cow::Borrowed(DateTimeFormatInfo::invariant());
        }
        'r' | 'R' | 'u' => {
            if let Some(offset) = offset {
                value = value
                    .checked_sub_offset(offset)
                    .ok_or(FormatError::OutOfCalendarRange)?;
            }
            info = Cow::Borrowed(DateTimeFormatInfo::invariant());
        }
        'U' => {
            if offset.is_some() {
                return Err(FormatError::OffsetNotSupported('U'));
            }
            value = clock::to_universal(&value)?;
            if info.calendar != Calendar::Gregorian {
                info.to_mut().calendar = Calendar::Gregorian;
            }
        }
        _ => {}
    }

    let pattern = real_format(specifier, &info)?;
    tracing::trace!(%specifier, %pattern, "expanded predefined format");
    Ok(ExpandedFormat { pattern, value, info })
}
