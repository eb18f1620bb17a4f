//! Culture-aware date/time formatting
//!
//! This module renders a [`DateTimeValue`] through either a predefined
//! single-letter format (`d`, `D`, `f`, `F`, `g`, `G`, `m`, `M`, `o`, `O`,
//! `r`, `R`, `s`, `t`, `T`, `u`, `U`, `y`, `Y`) or a custom pattern built
//! from field letters such as `yyyy`, `MMMM`, `HH` and `fff`.
//! The main entry point is the [`format`] function.

mod clock;
mod expand;
mod fields;
mod fixed;
mod hebrew_number;
mod lexer;
mod validate;

use chrono::FixedOffset;

use crate::error::FormatError;
use crate::locale::DateTimeFormatInfo;
use crate::types::DateTimeValue;

pub use fixed::{
    OFFSET_LENGTH, RFC1123_LENGTH, ROUND_TRIP_LENGTH, format_date_rfc1123, format_date_round_trip,
    format_rfc1123, format_round_trip, format_time_rfc1123, format_time_round_trip,
    try_format_rfc1123, try_format_round_trip,
};
pub use validate::{
    is_valid_custom_date_format, is_valid_custom_time_format, validate_custom_date_format,
    validate_custom_time_format,
};

/// Every predefined specifier, in enumeration order
pub const STANDARD_SPECIFIERS: &str = "dDfFgGmMoOrRstTuUyY";

/// Default pattern for offset-bearing time-of-day values on calendars that
/// cannot show 0001-01-01
const ROUND_TRIP_UNFIXED_PATTERN: &str = "yyyy'-'MM'-'ddTHH':'mm':'ss zzz";

/// The only character of a one-character pattern
fn single_char(pattern: &str) -> Option<char> {
    let mut chars = pattern.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Format a date/time value
///
/// # Arguments
/// * `value` - The value to format
/// * `pattern` - A predefined specifier or custom pattern; `None` or `""`
///   picks a default from the culture and the value
/// * `info` - Culture data, invariant when `None`
/// * `offset` - UTC offset of an offset-bearing value
///
/// # Returns
/// * `Result<String, FormatError>` - The formatted text, or the reason the
///   pattern could not be applied
///
/// # Examples
/// ```
/// use culture_format::{DateTimeKind, DateTimeValue};
/// use culture_format::formatter::format;
///
/// let value = DateTimeValue::from_parts(2017, 1, 3, 8, 8, 5, 0, DateTimeKind::Utc).unwrap();
/// assert_eq!(format(&value, Some("R"), None, None).unwrap(), "Tue, 03 Jan 2017 08:08:05 GMT");
/// assert_eq!(format(&value, Some("yyyy-MM-dd"), None, None).unwrap(), "2017-01-03");
/// ```
pub fn format(
    value: &DateTimeValue,
    pattern: Option<&str>,
    info: Option<&DateTimeFormatInfo>,
    offset: Option<FixedOffset>,
) -> Result<String, FormatError> {
    let pattern = pattern.unwrap_or("");
    match single_char(pattern) {
        Some('o' | 'O') => return Ok(fixed::format_round_trip(value, offset)),
        Some('r' | 'R') => return fixed::format_rfc1123(value, offset),
        _ => {}
    }

    let info = info.unwrap_or_else(|| DateTimeFormatInfo::invariant());
    let mut out = String::new();
    format_into(value, pattern, info, offset, &mut out)?;
    Ok(out)
}

fn format_into(
    value: &DateTimeValue,
    pattern: &str,
    info: &DateTimeFormatInfo,
    offset: Option<FixedOffset>,
    out: &mut String,
) -> Result<(), FormatError> {
    let mut info = info;
    let default_pattern;
    let pattern = if pattern.is_empty() {
        let fallback = value.is_time_of_day_only() && info.calendar.needs_time_only_fallback();
        if fallback {
            info = DateTimeFormatInfo::invariant();
        }
        default_pattern = match (offset, fallback) {
            (None, true) => "s".to_string(),
            (None, false) => "G".to_string(),
            (Some(_), true) => ROUND_TRIP_UNFIXED_PATTERN.to_string(),
            (Some(_), false) => info.date_time_offset_pattern(),
        };
        tracing::debug!(pattern = %default_pattern, "using default pattern");
        default_pattern.as_str()
    } else {
        pattern
    };

    match single_char(pattern) {
        Some(specifier) => {
            let expanded = expand::expand_predefined_format(specifier, value, info, offset)?;
            fields::format_custom(&expanded.value, &expanded.pattern, &expanded.info, offset, out)
        }
        None => fields::format_custom(value, pattern, info, offset, out),
    }
}

/// Format into a caller-supplied buffer
///
/// # Returns
/// * `Result<usize, FormatError>` - Bytes written; `FormatError::BufferTooSmall`
///   when `dest` cannot hold the whole text, in which case nothing is written
pub fn try_format(
    value: &DateTimeValue,
    pattern: Option<&str>,
    info: Option<&DateTimeFormatInfo>,
    offset: Option<FixedOffset>,
    dest: &mut [u8],
) -> Result<usize, FormatError> {
    match pattern.and_then(single_char) {
        Some('o' | 'O') => fixed::try_format_round_trip(value, offset, dest),
        Some('r' | 'R') => fixed::try_format_rfc1123(value, offset, dest),
        _ => {
            let text = format(value, pattern, info, offset)?;
            fixed::copy_into(text.as_bytes(), dest)
        }
    }
}

/// Format `value` with every pattern registered for `specifier`
///
/// Culture-invariant specifiers (`o O r R s u`) yield a single string; `U`
/// converts the value to universal time first.
pub fn all_date_times_for(
    value: &DateTimeValue,
    specifier: char,
    info: &DateTimeFormatInfo,
) -> Result<Vec<String>, FormatError> {
    match specifier {
        'd' | 'D' | 'f' | 'F' | 'g' | 'G' | 'm' | 'M' | 't' | 'T' | 'y' | 'Y' => info
            .all_patterns(specifier)?
            .iter()
            .map(|pattern| format(value, Some(pattern), Some(info), None))
            .collect(),
        'U' => {
            let universal = clock::to_universal(value)?;
            info.all_patterns(specifier)?
                .iter()
                .map(|pattern| format(&universal, Some(pattern), Some(info), None))
                .collect()
        }
        'o' | 'O' | 'r' | 'R' | 's' | 'u' => {
            let mut buf = [0u8; 4];
            let pattern = specifier.encode_utf8(&mut buf);
            Ok(vec![format(value, Some(pattern), Some(info), None)?])
        }
        other => Err(FormatError::UnknownSpecifier(other)),
    }
}

/// Format `value` with every pattern of every predefined specifier
pub fn all_date_times(value: &DateTimeValue, info: &DateTimeFormatInfo) -> Result<Vec<String>, FormatError> {
    let mut results = Vec::new();
    for specifier in STANDARD_SPECIFIERS.chars() {
        results.extend(all_date_times_for(value, specifier, info)?);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Calendar;
    use crate::types::DateTimeKind;

    fn sample(kind: DateTimeKind) -> DateTimeValue {
        DateTimeValue::from_parts(2017, 6, 12, 5, 30, 45, 7_680_000, kind).unwrap()
    }

    #[test]
    fn predefined_formats() {
        let value = sample(DateTimeKind::Utc);
        let format = |p: &str| format(&value, Some(p), None, None).unwrap();
        assert_eq!(format("d"), "06/12/2017");
        assert_eq!(format("D"), "Monday, 12 June 2017");
        assert_eq!(format("g"), "06/12/2017 05:30");
        assert_eq!(format("s"), "2017-06-12T05:30:45");
        assert_eq!(format("u"), "2017-06-12 05:30:45Z");
        assert_eq!(format("O"), "2017-06-12T05:30:45.7680000Z");
        assert_eq!(format("U"), "Monday, 12 June 2017 05:30:45");
        assert_eq!(format("m"), "June 12");
        assert_eq!(format("y"), "2017 June");
    }

    #[test]
    fn empty_pattern_defaults() {
        let value = sample(DateTimeKind::Unspecified);
        assert_eq!(format(&value, None, None, None).unwrap(), "06/12/2017 05:30:45");
        assert_eq!(format(&value, Some(""), None, None).unwrap(), "06/12/2017 05:30:45");

        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(format(&value, None, None, Some(offset)).unwrap(), "06/12/2017 05:30:45 +03:00");
    }

    #[test]
    fn time_of_day_values_fall_back_to_sortable() {
        let info = DateTimeFormatInfo::default().with_calendar(Calendar::Japanese);
        let value = DateTimeValue::from_parts(1, 1, 1, 13, 5, 0, 0, DateTimeKind::Unspecified).unwrap();
        assert_eq!(format(&value, None, Some(&info), None).unwrap(), "0001-01-01T13:05:00");

        let offset = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            format(&value, None, Some(&info), Some(offset)).unwrap(),
            "0001-01-01T13:05:00 +01:00"
        );
    }

    #[test]
    fn try_format_reports_the_needed_size() {
        let value = sample(DateTimeKind::Utc);
        let mut small = [0u8; 4];
        assert_eq!(
            try_format(&value, Some("yyyy-MM-dd"), None, None, &mut small),
            Err(FormatError::BufferTooSmall { needed: 10, available: 4 })
        );
        let mut dest = [0u8; 64];
        let written = try_format(&value, Some("o"), None, None, &mut dest).unwrap();
        assert_eq!(&dest[..written], b"2017-06-12T05:30:45.7680000Z");
    }

    #[test]
    fn enumeration() {
        let value = sample(DateTimeKind::Utc);
        let info = DateTimeFormatInfo::invariant();
        let short_dates = all_date_times_for(&value, 'd', info).unwrap();
        assert_eq!(short_dates, vec!["06/12/2017", "2017-06-12"]);
        assert_eq!(all_date_times_for(&value, 'u', info).unwrap(), vec!["2017-06-12 05:30:45Z"]);
        assert_eq!(all_date_times_for(&value, 'x', info), Err(FormatError::UnknownSpecifier('x')));

        let all = all_date_times(&value, info).unwrap();
        assert!(all.contains(&"Mon, 12 Jun 2017 05:30:45 GMT".to_string()));
        assert!(all.len() > STANDARD_SPECIFIERS.len());
    }
}
