//! Fixed-layout formatters for the round-trip (`O`) and RFC 1123 (`R`)
//! formats
//!
//! Both layouts are ASCII with every field at a known position, so they are
//! written straight into a byte buffer without going through the pattern
//! interpreter.

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike};

use super::clock;
use crate::error::FormatError;
use crate::types::{DateTimeKind, DateTimeValue};

/// `yyyy-MM-ddTHH:mm:ss.fffffff`
pub const ROUND_TRIP_LENGTH: usize = 27;
/// `±HH:MM` appended for local and offset-bearing values
pub const OFFSET_LENGTH: usize = 6;
/// `ddd, dd MMM yyyy HH:mm:ss GMT`
pub const RFC1123_LENGTH: usize = 29;

const DAY_ABBREVIATIONS: [&[u8; 3]; 7] = [b"Sun", b"Mon", b"Tue", b"Wed", b"Thu", b"Fri", b"Sat"];
const MONTH_ABBREVIATIONS: [&[u8; 3]; 12] = [
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun", b"Jul", b"Aug", b"Sep", b"Oct", b"Nov", b"Dec",
];

/// Write `value` as zero-padded decimal digits filling `slot`
fn put_digits(slot: &mut [u8], mut value: u32) {
    for byte in slot.iter_mut().rev() {
        *byte = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

fn put_date(buf: &mut [u8], date: NaiveDate) {
    put_digits(&mut buf[0..4], date.year() as u32);
    buf[4] = b'-';
    put_digits(&mut buf[5..7], date.month());
    buf[7] = b'-';
    put_digits(&mut buf[8..10], date.day());
}

fn put_time(buf: &mut [u8], time: NaiveTime) {
    put_digits(&mut buf[0..2], time.hour());
    buf[2] = b':';
    put_digits(&mut buf[3..5], time.minute());
    buf[5] = b':';
    put_digits(&mut buf[6..8], time.second());
}

fn put_fraction(buf: &mut [u8], time: NaiveTime) {
    buf[0] = b'.';
    put_digits(&mut buf[1..8], (time.nanosecond() % 1_000_000_000) / 100);
}

fn put_offset(buf: &mut [u8], offset: FixedOffset) {
    let seconds = offset.local_minus_utc();
    buf[0] = if seconds < 0 { b'-' } else { b'+' };
    let minutes = seconds.unsigned_abs() / 60;
    put_digits(&mut buf[1..3], minutes / 60);
    buf[3] = b':';
    put_digits(&mut buf[4..6], minutes % 60);
}

fn to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Copy a finished layout into `dest`, touching nothing when it does not fit
pub(crate) fn copy_into(bytes: &[u8], dest: &mut [u8]) -> Result<usize, FormatError> {
    if dest.len() < bytes.len() {
        return Err(FormatError::BufferTooSmall {
            needed: bytes.len(),
            available: dest.len(),
        });
    }
    dest[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}

fn round_trip_bytes(
    value: &DateTimeValue,
    offset: Option<FixedOffset>,
) -> ([u8; ROUND_TRIP_LENGTH + OFFSET_LENGTH], usize) {
    let mut buf = [0u8; ROUND_TRIP_LENGTH + OFFSET_LENGTH];
    let naive = value.naive();
    put_date(&mut buf[0..10], naive.date());
    buf[10] = b'T';
    put_time(&mut buf[11..19], naive.time());
    put_fraction(&mut buf[19..27], naive.time());

    let offset = match (offset, value.kind()) {
        (Some(offset), _) => Some(offset),
        (None, DateTimeKind::Local) => Some(clock::offset_at(naive)),
        (None, DateTimeKind::Utc) => {
            buf[ROUND_TRIP_LENGTH] = b'Z';
            return (buf, ROUND_TRIP_LENGTH + 1);
        }
        (None, DateTimeKind::Unspecified) => None,
    };
    match offset {
        Some(offset) => {
            put_offset(&mut buf[ROUND_TRIP_LENGTH..], offset);
            (buf, ROUND_TRIP_LENGTH + OFFSET_LENGTH)
        }
        None => (buf, ROUND_TRIP_LENGTH),
    }
}

fn rfc1123_bytes(
    value: &DateTimeValue,
    offset: Option<FixedOffset>,
) -> Result<[u8; RFC1123_LENGTH], FormatError> {
    let value = match offset {
        Some(offset) => value
            .checked_sub_offset(offset)
            .ok_or(FormatError::OutOfCalendarRange)?,
        None => *value,
    };
    let naive = value.naive();
    let mut buf = [0u8; RFC1123_LENGTH];
    put_rfc1123_date(&mut buf[0..16], naive.date());
    buf[16] = b' ';
    put_time(&mut buf[17..25], naive.time());
    buf[25..29].copy_from_slice(b" GMT");
    Ok(buf)
}

fn put_rfc1123_date(buf: &mut [u8], date: NaiveDate) {
    let weekday = date.weekday().num_days_from_sunday() as usize;
    buf[0..3].copy_from_slice(DAY_ABBREVIATIONS[weekday]);
    buf[3..5].copy_from_slice(b", ");
    put_digits(&mut buf[5..7], date.day());
    buf[7] = b' ';
    buf[8..11].copy_from_slice(MONTH_ABBREVIATIONS[date.month0() as usize]);
    buf[11] = b' ';
    put_digits(&mut buf[12..16], date.year() as u32);
}

/// Round-trip text: `2017-06-12T05:30:45.7680000` followed by `Z` for UTC
/// values or `±HH:MM` for local and offset-bearing values
pub fn format_round_trip(value: &DateTimeValue, offset: Option<FixedOffset>) -> String {
    let (buf, len) = round_trip_bytes(value, offset);
    to_string(&buf[..len])
}

/// Write the round-trip text into `dest`, returning the number of bytes
pub fn try_format_round_trip(
    value: &DateTimeValue,
    offset: Option<FixedOffset>,
    dest: &mut [u8],
) -> Result<usize, FormatError> {
    let (buf, len) = round_trip_bytes(value, offset);
    copy_into(&buf[..len], dest)
}

/// RFC 1123 text such as `Tue, 03 Jan 2017 08:08:05 GMT`; an explicit
/// offset is subtracted first
pub fn format_rfc1123(value: &DateTimeValue, offset: Option<FixedOffset>) -> Result<String, FormatError> {
    rfc1123_bytes(value, offset).map(|buf| to_string(&buf))
}

/// Write the RFC 1123 text into `dest`, returning the number of bytes
pub fn try_format_rfc1123(
    value: &DateTimeValue,
    offset: Option<FixedOffset>,
    dest: &mut [u8],
) -> Result<usize, FormatError> {
    copy_into(&rfc1123_bytes(value, offset)?, dest)
}

/// `2017-06-12`
pub fn format_date_round_trip(date: NaiveDate) -> String {
    let mut buf = [0u8; 10];
    put_date(&mut buf, date);
    to_string(&buf)
}

/// `05:30:45.7680000`
pub fn format_time_round_trip(time: NaiveTime) -> String {
    let mut buf = [0u8; 16];
    put_time(&mut buf[0..8], time);
    put_fraction(&mut buf[8..16], time);
    to_string(&buf)
}

/// `Tue, 03 Jan 2017`
pub fn format_date_rfc1123(date: NaiveDate) -> String {
    let mut buf = [0u8; 16];
    put_rfc1123_date(&mut buf, date);
    to_string(&buf)
}

/// `05:30:45`
pub fn format_time_rfc1123(time: NaiveTime) -> String {
    let mut buf = [0u8; 8];
    put_time(&mut buf, time);
    to_string(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: DateTimeKind) -> DateTimeValue {
        DateTimeValue::from_parts(2017, 6, 12, 5, 30, 45, 7_680_000, kind).unwrap()
    }

    #[test]
    fn round_trip_by_kind() {
        assert_eq!(format_round_trip(&sample(DateTimeKind::Utc), None), "2017-06-12T05:30:45.7680000Z");
        assert_eq!(
            format_round_trip(&sample(DateTimeKind::Unspecified), None),
            "2017-06-12T05:30:45.7680000"
        );
        let local = format_round_trip(&sample(DateTimeKind::Local), None);
        assert_eq!(local.len(), ROUND_TRIP_LENGTH + OFFSET_LENGTH);
        assert!(matches!(local.as_bytes()[27], b'+' | b'-'));
    }

    #[test]
    fn round_trip_with_offset() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        assert_eq!(
            format_round_trip(&sample(DateTimeKind::Unspecified), Some(offset)),
            "2017-06-12T05:30:45.7680000-07:00"
        );
        let offset = FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap();
        assert!(format_round_trip(&sample(DateTimeKind::Utc), Some(offset)).ends_with("+05:45"));
    }

    #[test]
    fn rfc1123() {
        let value = DateTimeValue::from_parts(2017, 1, 3, 8, 8, 5, 0, DateTimeKind::Utc).unwrap();
        assert_eq!(format_rfc1123(&value, None).unwrap(), "Tue, 03 Jan 2017 08:08:05 GMT");

        let offset = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(format_rfc1123(&value, Some(offset)).unwrap(), "Tue, 03 Jan 2017 07:08:05 GMT");
    }

    #[test]
    fn undersized_destination_is_untouched() {
        let mut dest = [b'x'; 28];
        let err = try_format_rfc1123(&sample(DateTimeKind::Utc), None, &mut dest).unwrap_err();
        assert_eq!(err, FormatError::BufferTooSmall { needed: 29, available: 28 });
        assert!(dest.iter().all(|b| *b == b'x'));

        let mut dest = [0u8; 27];
        assert!(try_format_round_trip(&sample(DateTimeKind::Utc), None, &mut dest).is_err());
        assert_eq!(try_format_round_trip(&sample(DateTimeKind::Unspecified), None, &mut dest), Ok(27));
    }

    #[test]
    fn date_and_time_only() {
        let date = NaiveDate::from_ymd_opt(2017, 1, 3).unwrap();
        let time = NaiveTime::from_hms_nano_opt(5, 30, 45, 768_000_000).unwrap();
        assert_eq!(format_date_round_trip(date), "2017-01-03");
        assert_eq!(format_time_round_trip(time), "05:30:45.7680000");
        assert_eq!(format_date_rfc1123(date), "Tue, 03 Jan 2017");
        assert_eq!(format_time_rfc1123(time), "05:30:45");
    }
}
