//! Offsets of the machine's local time zone

use chrono::{FixedOffset, Local, NaiveDateTime, TimeZone};

use crate::error::FormatError;
use crate::types::{DateTimeKind, DateTimeValue};

/// Offset of the local zone right now
pub(crate) fn current_offset() -> FixedOffset {
    *Local::now().offset()
}

/// Offset of the local zone at a local wall-clock time; for skipped or
/// repeated times the earlier mapping wins, then the current offset
pub(crate) fn offset_at(naive: NaiveDateTime) -> FixedOffset {
    Local
        .offset_from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(current_offset)
}

/// Convert to UTC; unspecified values are taken as local time
pub(crate) fn to_universal(value: &DateTimeValue) -> Result<DateTimeValue, FormatError> {
    match value.kind() {
        DateTimeKind::Utc => Ok(*value),
        DateTimeKind::Local | DateTimeKind::Unspecified => value
            .checked_sub_offset(offset_at(value.naive()))
            .map(|v| v.with_kind(DateTimeKind::Utc))
            .ok_or(FormatError::OutOfCalendarRange),
    }
}
