//! Calendars used by the date/time formatter
//!
//! A calendar splits a proleptic Gregorian date into era, year, month and
//! day. The Gregorian and Japanese calendars share month/day numbering; the
//! Hebrew calendar is lunisolar with a thirteenth month in leap years.

mod hebrew;
mod japanese;

use chrono::{Datelike, NaiveDate};

use crate::error::FormatError;

/// Calendar attached to a [`DateTimeFormatInfo`](crate::locale::DateTimeFormatInfo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Calendar {
    /// Proleptic Gregorian calendar, single era
    #[default]
    Gregorian,
    /// Gregorian months with years counted from the start of each imperial era
    Japanese,
    /// Hebrew lunisolar calendar
    Hebrew,
}

/// A date expressed in a particular calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    /// Era number, 1-based
    pub era: usize,
    /// Year within the era
    pub year: i32,
    /// Month number, 1-based; up to 13 for Hebrew leap years
    pub month: u32,
    /// Day of the month, 1-based
    pub day: u32,
    /// Whether `year` is a leap year of this calendar
    pub leap_year: bool,
}

impl Calendar {
    /// Look up a calendar by its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "gregorian" => Some(Calendar::Gregorian),
            "japanese" => Some(Calendar::Japanese),
            "hebrew" => Some(Calendar::Hebrew),
            _ => None,
        }
    }

    /// Split a date into calendar components
    ///
    /// # Arguments
    /// * `date` - Proleptic Gregorian date
    ///
    /// # Returns
    /// The calendar date, or `FormatError::OutOfCalendarRange` when the
    /// calendar does not cover `date`
    pub fn date(self, date: NaiveDate) -> Result<CalendarDate, FormatError> {
        match self {
            Calendar::Gregorian => Ok(CalendarDate {
                era: 1,
                year: date.year(),
                month: date.month(),
                day: date.day(),
                leap_year: date.leap_year(),
            }),
            Calendar::Japanese => japanese::to_japanese(date).ok_or(FormatError::OutOfCalendarRange),
            Calendar::Hebrew => hebrew::to_hebrew(date).ok_or(FormatError::OutOfCalendarRange),
        }
    }

    /// Calendars whose year is always printed with at most two digits
    pub fn forces_two_digit_years(self) -> bool {
        matches!(self, Calendar::Japanese)
    }

    /// Calendars that cannot represent 0001-01-01, so time-of-day-only values
    /// are formatted with invariant data instead
    pub fn needs_time_only_fallback(self) -> bool {
        matches!(self, Calendar::Japanese | Calendar::Hebrew)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn gregorian_passthrough() {
        let date = Calendar::Gregorian.date(ymd(2024, 2, 29)).unwrap();
        assert_eq!((date.era, date.year, date.month, date.day), (1, 2024, 2, 29));
        assert!(date.leap_year);
    }

    #[test]
    fn calendar_names() {
        assert_eq!(Calendar::from_name("Hebrew"), Some(Calendar::Hebrew));
        assert_eq!(Calendar::from_name("julian"), None);
    }

    #[test]
    fn out_of_range_dates() {
        assert_eq!(
            Calendar::Japanese.date(ymd(1800, 1, 1)),
            Err(FormatError::OutOfCalendarRange)
        );
        assert_eq!(
            Calendar::Hebrew.date(ymd(1, 1, 1)),
            Err(FormatError::OutOfCalendarRange)
        );
    }
}
