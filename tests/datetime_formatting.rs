use chrono::FixedOffset;
use culture_format::formatter::{all_date_times_for, format, try_format};
use culture_format::locale::datetime_format_info;
use culture_format::{Calendar, DateTimeFormatInfo, DateTimeKind, DateTimeValue, FormatError};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTimeValue {
    DateTimeValue::from_parts(year, month, day, hour, minute, second, 0, DateTimeKind::Unspecified)
        .unwrap()
}

fn custom(value: &DateTimeValue, pattern: &str, info: &DateTimeFormatInfo) -> String {
    format(value, Some(pattern), Some(info), None).unwrap()
}

#[test]
fn test_rfc1123_literal() {
    let value = at(2017, 1, 3, 8, 8, 5).with_kind(DateTimeKind::Utc);
    assert_eq!(
        format(&value, Some("R"), None, None).unwrap(),
        "Tue, 03 Jan 2017 08:08:05 GMT"
    );
    assert_eq!(
        format(&value, Some("r"), None, None).unwrap(),
        "Tue, 03 Jan 2017 08:08:05 GMT"
    );
}

#[test]
fn test_round_trip_literal() {
    let utc =
        DateTimeValue::from_parts(2017, 6, 12, 5, 30, 45, 7_680_000, DateTimeKind::Utc).unwrap();
    let text = format(&utc, Some("O"), None, None).unwrap();
    assert_eq!(text, "2017-06-12T05:30:45.7680000Z");
    assert_eq!(text.len(), 28);

    let offset = FixedOffset::west_opt(7 * 3600).unwrap();
    let unspecified = utc.with_kind(DateTimeKind::Unspecified);
    let text = format(&unspecified, Some("o"), None, Some(offset)).unwrap();
    assert_eq!(text, "2017-06-12T05:30:45.7680000-07:00");
    assert_eq!(text.len(), 33);

    let local = format(&utc.with_kind(DateTimeKind::Local), Some("O"), None, None).unwrap();
    assert_eq!(local.len(), 33);
    assert_eq!(&local[30..31], ":");
}

#[test]
fn test_quoted_literals() {
    let value = at(2017, 6, 12, 5, 45, 0);
    let info = DateTimeFormatInfo::invariant();
    assert_eq!(custom(&value, "'minute:' mm\\\"", info), "minute: 45\"");
    assert_eq!(custom(&value, "\"hour\" H", info), "hour 5");
    assert_eq!(custom(&value, "'It''s' HH", info), "Its 05");
}

#[test]
fn test_malformed_patterns() {
    let value = at(2017, 6, 12, 5, 45, 0);
    let err = |p: &str| format(&value, Some(p), None, None).unwrap_err();
    assert_eq!(err("HH 'open"), FormatError::UnterminatedQuote('\''));
    assert_eq!(err("HH\\"), FormatError::TrailingEscape);
    assert_eq!(err("HH%"), FormatError::InvalidPercent);
    assert_eq!(err("%%"), FormatError::InvalidPercent);
    assert_eq!(err("ss.ffffffff"), FormatError::FractionTooLong(8));
    assert_eq!(err("x"), FormatError::UnknownSpecifier('x'));
}

#[test]
fn test_percent_forces_custom_interpretation() {
    let value = at(2017, 6, 12, 5, 45, 0);
    assert_eq!(format(&value, Some("%d"), None, None).unwrap(), "12");
    assert_eq!(format(&value, Some("d"), None, None).unwrap(), "06/12/2017");
    assert_eq!(format(&value, Some("%y"), None, None).unwrap(), "17");
}

#[test]
fn test_genitive_month_names() {
    let ru = datetime_format_info("ru-RU").unwrap();
    let value = at(2017, 6, 12, 17, 30, 45);
    assert_eq!(custom(&value, "d MMMM yyyy", &ru), "12 июня 2017");
    assert_eq!(custom(&value, "MMMM dd", &ru), "июня 12");
    assert_eq!(custom(&value, "MMMM yyyy", &ru), "июнь 2017");
    assert_eq!(custom(&value, "dddd MMMM", &ru), "понедельник июнь");
    assert_eq!(custom(&value, "d MMM", &ru), "12 июн.");
    assert_eq!(custom(&value, "MMM", &ru), "июнь");
    assert_eq!(format(&value, Some("D"), Some(&ru), None).unwrap(), "12 июня 2017 г.");
    assert_eq!(format(&value, Some("Y"), Some(&ru), None).unwrap(), "июнь 2017");
    assert_eq!(format(&value, Some("d"), Some(&ru), None).unwrap(), "12.06.2017");
}

#[test]
fn test_japanese_first_year_glyph() {
    let ja = datetime_format_info("ja-JP").unwrap();
    let reiwa_first = at(2019, 5, 1, 9, 0, 0);
    assert_eq!(format(&reiwa_first, Some("D"), Some(&ja), None).unwrap(), "令和 元年5月1日");
    assert_eq!(custom(&reiwa_first, "gg y", &ja), "令和 1");

    let numeric = ja.clone().with_japanese_first_year_as_number(true);
    assert_eq!(format(&reiwa_first, Some("D"), Some(&numeric), None).unwrap(), "令和 1年5月1日");

    let heisei_last = at(2019, 4, 30, 9, 0, 0);
    assert_eq!(format(&heisei_last, Some("D"), Some(&ja), None).unwrap(), "平成 31年4月30日");
}

#[test]
fn test_japanese_two_digit_years() {
    let ja = datetime_format_info("ja-JP").unwrap();
    let value = at(2020, 1, 15, 13, 5, 0);
    assert_eq!(custom(&value, "gg yy/MM/dd", &ja), "令和 02/01/15");
    assert_eq!(custom(&value, "yyyy", &ja), "02");
    assert_eq!(format(&value, Some("d"), Some(&ja), None).unwrap(), "令和 2/1/15");
    assert_eq!(custom(&value, "tt h:mm", &ja), "午後 1:05");
}

#[test]
fn test_japanese_calendar_range() {
    let ja = datetime_format_info("ja-JP").unwrap();
    let value = at(1850, 1, 1, 0, 0, 0);
    assert_eq!(
        format(&value, Some("yyyy"), Some(&ja), None),
        Err(FormatError::OutOfCalendarRange)
    );
    // Clock fields never consult the calendar
    assert_eq!(custom(&value, "HH:mm", &ja), "00:00");
}

#[test]
fn test_hebrew_numerals_and_months() {
    let he = datetime_format_info("he-IL").unwrap();

    // 1 Tishri 5785, a regular year
    let new_year = at(2024, 10, 3, 12, 0, 0);
    assert_eq!(custom(&new_year, "dd MMMM yyyy", &he), "א' תשרי תשפ\"ה");
    assert_eq!(custom(&new_year, "MM", &he), "א'");

    // 1 Nisan 5784, a leap year
    let nisan = at(2024, 4, 9, 12, 0, 0);
    assert_eq!(custom(&nisan, "dd MMMM yyyy", &he), "א' ניסן תשפ\"ד");
    assert_eq!(custom(&nisan, "M", &he), "ח'");
}

#[test]
fn test_hebrew_regular_year_skips_second_adar() {
    let he = DateTimeFormatInfo::default()
        .with_calendar(Calendar::Hebrew)
        .with_month_names(
            (1..=13).map(|m| format!("m{m}")).collect(),
            (1..=13).map(|m| format!("a{m}")).collect(),
        );
    // 5785 is a regular year; 2025-04-13 is in its seventh month
    let value = at(2025, 4, 13, 0, 0, 0);
    assert_eq!(custom(&value, "MMMM", &he), "m8");
    assert_eq!(custom(&value, "MMM", &he), "a8");
}

#[test]
fn test_time_of_day_default_for_hebrew() {
    let he = datetime_format_info("he-IL").unwrap();
    let value = at(1, 1, 1, 8, 15, 0);
    assert_eq!(format(&value, None, Some(&he), None).unwrap(), "0001-01-01T08:15:00");
}

#[test]
fn test_universal_full_format() {
    let utc = at(2017, 6, 12, 22, 0, 0).with_kind(DateTimeKind::Utc);
    assert_eq!(
        format(&utc, Some("U"), None, None).unwrap(),
        "Monday, 12 June 2017 22:00:00"
    );
    let offset = FixedOffset::east_opt(3600).unwrap();
    assert_eq!(
        format(&utc, Some("U"), None, Some(offset)),
        Err(FormatError::OffsetNotSupported('U'))
    );
}

#[test]
fn test_universal_sortable_subtracts_offset() {
    let value = at(2017, 6, 12, 1, 0, 0);
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    assert_eq!(
        format(&value, Some("u"), None, Some(offset)).unwrap(),
        "2017-06-11 23:00:00Z"
    );
}

#[test]
fn test_time_zone_fields_with_offset() {
    let value = at(2017, 6, 12, 1, 0, 0);
    let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
    assert_eq!(
        format(&value, Some("z|zz|zzz|K"), None, Some(offset)).unwrap(),
        "+5|+05|+05:30|+05:30"
    );
    let utc = value.with_kind(DateTimeKind::Utc);
    assert_eq!(format(&utc, Some("zzz K"), None, None).unwrap(), "+00:00 Z");
}

#[test]
fn test_try_format_into_buffer() {
    let value = at(2017, 1, 3, 8, 8, 5);
    let mut dest = [0u8; 29];
    let written = try_format(&value, Some("R"), None, None, &mut dest).unwrap();
    assert_eq!(&dest[..written], b"Tue, 03 Jan 2017 08:08:05 GMT");

    let mut short = [0u8; 28];
    assert_eq!(
        try_format(&value, Some("R"), None, None, &mut short),
        Err(FormatError::BufferTooSmall { needed: 29, available: 28 })
    );
}

#[test]
fn test_all_patterns_for_specifier() {
    let en = datetime_format_info("en-US").unwrap();
    let value = at(2017, 6, 12, 17, 30, 45);
    let times = all_date_times_for(&value, 't', &en).unwrap();
    assert_eq!(times, vec!["5:30 PM", "05:30 PM", "17:30", "17:30"]);
}
