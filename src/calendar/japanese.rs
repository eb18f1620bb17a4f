//! Japanese imperial era calendar

use chrono::{Datelike, NaiveDate};

use super::CalendarDate;

/// First Gregorian day of each era, oldest first
const ERA_STARTS: [(i32, u32, u32); 5] = [
    (1868, 9, 8),
    (1912, 7, 30),
    (1926, 12, 25),
    (1989, 1, 8),
    (2019, 5, 1),
];

pub(super) fn to_japanese(date: NaiveDate) -> Option<CalendarDate> {
    let (index, start_year) = ERA_STARTS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, (y, m, d))| (date.year(), date.month(), date.day()) >= (*y, *m, *d))
        .map(|(index, (y, _, _))| (index, *y))?;

    Some(CalendarDate {
        era: index + 1,
        year: date.year() - start_year + 1,
        month: date.month(),
        day: date.day(),
        leap_year: date.leap_year(),
    })
}
