//! Hebrew lunisolar calendar
//!
//! Months are numbered from Tishri. Leap years have thirteen months with
//! Adar I at position 6 and Adar II at position 7.

use chrono::{Datelike, NaiveDate};

use super::CalendarDate;

/// Fixed day number of 1 Tishri, year 1
const EPOCH: i64 = -1_373_427;
const PARTS_PER_DAY: i64 = 25_920;

/// Supported Gregorian range, 5343-04-07 to 5999-13-29
const MIN_DATE: (i32, u32, u32) = (1583, 1, 1);
const MAX_DATE: (i32, u32, u32) = (2239, 9, 29);

fn is_leap_year(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

/// Days from the epoch to the molad of Tishri, with the weekday postponement
fn elapsed_days(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12_084 + 13_753 * months;
    let day = 29 * months + parts.div_euclid(PARTS_PER_DAY);
    if (3 * (day + 1)).rem_euclid(7) < 3 {
        day + 1
    } else {
        day
    }
}

fn year_length_correction(year: i64) -> i64 {
    let previous = elapsed_days(year - 1);
    let current = elapsed_days(year);
    let next = elapsed_days(year + 1);
    if next - current == 356 {
        2
    } else if current - previous == 382 {
        1
    } else {
        0
    }
}

fn new_year(year: i64) -> i64 {
    EPOCH + elapsed_days(year) + year_length_correction(year)
}

fn month_lengths(year: i64) -> Vec<i64> {
    let days = new_year(year + 1) - new_year(year);
    let heshvan = if days % 10 == 5 { 30 } else { 29 };
    let kislev = if days % 10 == 3 { 29 } else { 30 };

    let mut lengths = vec![30, heshvan, kislev, 29, 30];
    if is_leap_year(year) {
        lengths.extend([30, 29]);
    } else {
        lengths.push(29);
    }
    lengths.extend([30, 29, 30, 29, 30, 29]);
    lengths
}

pub(super) fn to_hebrew(date: NaiveDate) -> Option<CalendarDate> {
    let key = (date.year(), date.month(), date.day());
    if key < MIN_DATE || key > MAX_DATE {
        return None;
    }

    let fixed = date.num_days_from_ce() as i64;
    let mut year = (fixed - EPOCH) * 98_496 / 35_975_351;
    while new_year(year + 1) <= fixed {
        year += 1;
    }

    let mut remaining = fixed - new_year(year);
    for (index, length) in month_lengths(year).into_iter().enumerate() {
        if remaining < length {
            return Some(CalendarDate {
                era: 1,
                year: year as i32,
                month: index as u32 + 1,
                day: remaining as u32 + 1,
                leap_year: is_leap_year(year),
            });
        }
        remaining -= length;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hebrew(y: i32, m: u32, d: u32) -> (i32, u32, u32) {
        let date = to_hebrew(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap();
        (date.year, date.month, date.day)
    }

    #[test]
    fn new_years() {
        assert_eq!(hebrew(2024, 10, 3), (5785, 1, 1));
        assert_eq!(hebrew(2023, 9, 16), (5784, 1, 1));
    }

    #[test]
    fn leap_year_months() {
        // 1 Adar II and 1 Nisan 5784
        assert_eq!(hebrew(2024, 3, 11), (5784, 7, 1));
        assert_eq!(hebrew(2024, 4, 9), (5784, 8, 1));
        assert!(is_leap_year(5784));
        assert!(!is_leap_year(5783));
    }

    #[test]
    fn range_limits() {
        assert_eq!(hebrew(1583, 1, 1), (5343, 4, 7));
        assert_eq!(hebrew(2239, 9, 29), (5999, 13, 29));
        assert!(to_hebrew(NaiveDate::from_ymd_opt(2239, 9, 30).unwrap()).is_none());
    }

    #[test]
    fn year_lengths_are_valid() {
        for year in 5343..6000 {
            let total: i64 = month_lengths(year).iter().sum();
            assert_eq!(total, new_year(year + 1) - new_year(year));
            assert!(matches!(total, 353..=355 | 383..=385), "{year}: {total}");
        }
    }
}
