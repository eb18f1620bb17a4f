//! Culture data for parsing and formatting
//!
//! This module loads the bundled culture tables and hands out
//! [`NumberFormatInfo`] and [`DateTimeFormatInfo`] values by culture name
//! (e.g. "fr-FR") or Windows locale identifier (e.g. 0x040C).

mod datetime_info;
mod number_info;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use datetime_info::{
    DateTimeFormatInfo, RFC1123_PATTERN, ROUND_TRIP_PATTERN, SORTABLE_PATTERN,
    UNIVERSAL_SORTABLE_PATTERN,
};
pub use number_info::NumberFormatInfo;

use crate::calendar::Calendar;

/// Error type for locale operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    /// The specified culture was not found
    #[error("Culture not found: {0}")]
    NotFound(String),
    /// An error occurred while parsing culture data
    #[error("Error parsing culture data: {0}")]
    ParseError(String),
}

type Result<T> = std::result::Result<T, LocaleError>;

/// Number and date/time settings of one culture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CultureInfo {
    /// Culture name, empty for the invariant culture
    pub name: String,
    /// Number symbols
    pub number: NumberFormatInfo,
    /// Date/time names and patterns
    pub datetime: DateTimeFormatInfo,
}

impl CultureInfo {
    /// The invariant culture
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            number: NumberFormatInfo::default(),
            datetime: DateTimeFormatInfo::default(),
        }
    }
}

/// Provides access to the bundled cultures
pub struct LocaleManager {
    culture_codes: HashMap<u32, String>,
    cultures: HashMap<String, CultureInfo>,
}

static LOCALE_MANAGER: OnceLock<LocaleManager> = OnceLock::new();

impl LocaleManager {
    fn new() -> Self {
        let mut manager = Self {
            culture_codes: HashMap::new(),
            cultures: HashMap::new(),
        };
        manager
            .cultures
            .insert(String::new(), CultureInfo::invariant());

        if let Err(e) = manager.load_embedded_data() {
            // Keep serving the invariant culture
            tracing::error!(error = %e, "failed to load embedded culture data");
        }

        manager
    }

    fn load_embedded_data(&mut self) -> Result<()> {
        let codes_toml = include_str!("locale/culture_codes.toml");
        self.parse_culture_codes(codes_toml)?;

        let cultures_toml = include_str!("locale/cultures.toml");
        self.parse_cultures(cultures_toml)?;

        tracing::debug!(cultures = self.cultures.len(), "loaded culture data");
        Ok(())
    }

    fn parse_culture_codes(&mut self, toml_str: &str) -> Result<()> {
        let parsed: toml::Value =
            toml::from_str(toml_str).map_err(|e| LocaleError::ParseError(e.to_string()))?;

        let table = parsed
            .as_table()
            .ok_or_else(|| LocaleError::ParseError("Root is not a table".to_string()))?;

        for (key, value) in table {
            if !key.starts_with("code_") {
                continue;
            }
            let code_table = value
                .as_table()
                .ok_or_else(|| LocaleError::ParseError(format!("{} is not a table", key)))?;

            let code = code_table
                .get("code")
                .and_then(|v| v.as_integer())
                .ok_or_else(|| LocaleError::ParseError(format!("Missing or invalid code in {}", key)))?;

            let culture = code_table
                .get("culture")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    LocaleError::ParseError(format!("Missing or invalid culture in {}", key))
                })?;

            self.culture_codes.insert(code as u32, culture.to_string());
        }

        Ok(())
    }

    fn parse_cultures(&mut self, toml_str: &str) -> Result<()> {
        let parsed: toml::Value =
            toml::from_str(toml_str).map_err(|e| LocaleError::ParseError(e.to_string()))?;

        let table = parsed
            .as_table()
            .ok_or_else(|| LocaleError::ParseError("Root is not a table".to_string()))?;

        for (name, value) in table {
            let culture_table = value
                .as_table()
                .ok_or_else(|| LocaleError::ParseError(format!("{} is not a table", name)))?;

            let mut culture = CultureInfo::invariant();
            culture.name = name.clone();

            if let Some(number) = culture_table.get("number") {
                apply_number_settings(&mut culture.number, name, number)?;
            }
            if let Some(datetime) = culture_table.get("datetime") {
                apply_datetime_settings(&mut culture.datetime, name, datetime)?;
            }

            self.cultures.insert(name.clone(), culture);
        }

        Ok(())
    }

    fn get() -> &'static Self {
        LOCALE_MANAGER.get_or_init(Self::new)
    }

    fn culture(&self, name: &str) -> Option<&CultureInfo> {
        self.cultures.get(name)
    }

    fn resolve_culture_code(&self, code: u32) -> Option<&str> {
        self.culture_codes.get(&code).map(|s| s.as_str())
    }
}

fn setting_table<'a>(culture: &str, section: &str, value: &'a toml::Value) -> Result<&'a toml::Table> {
    value.as_table().ok_or_else(|| {
        LocaleError::ParseError(format!("{}.{} is not a table", culture, section))
    })
}

fn read_string(table: &toml::Table, key: &str) -> Option<String> {
    table.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

/// Read a string array, checking its length when `expected` is given
fn read_names(table: &toml::Table, key: &str, expected: Option<&[usize]>) -> Result<Option<Vec<String>>> {
    let Some(value) = table.get(key) else {
        return Ok(None);
    };
    let array = value
        .as_array()
        .ok_or_else(|| LocaleError::ParseError(format!("{} is not an array", key)))?;

    let names = array
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| LocaleError::ParseError(format!("{} contains a non-string entry", key)))
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(lengths) = expected {
        if !lengths.contains(&names.len()) {
            return Err(LocaleError::ParseError(format!(
                "{} has {} entries, expected one of {:?}",
                key,
                names.len(),
                lengths
            )));
        }
    }
    Ok(Some(names))
}

fn apply_number_settings(info: &mut NumberFormatInfo, culture: &str, value: &toml::Value) -> Result<()> {
    let table = setting_table(culture, "number", value)?;

    let strings: [(&str, &mut String); 10] = [
        ("positive_sign", &mut info.positive_sign),
        ("negative_sign", &mut info.negative_sign),
        ("decimal_separator", &mut info.number_decimal_separator),
        ("group_separator", &mut info.number_group_separator),
        ("currency_symbol", &mut info.currency_symbol),
        ("currency_decimal_separator", &mut info.currency_decimal_separator),
        ("currency_group_separator", &mut info.currency_group_separator),
        ("positive_infinity", &mut info.positive_infinity_symbol),
        ("negative_infinity", &mut info.negative_infinity_symbol),
        ("nan", &mut info.nan_symbol),
    ];
    for (key, field) in strings {
        if let Some(s) = read_string(table, key) {
            *field = s;
        }
    }

    if let Some(pattern) = table.get("negative_pattern").and_then(|v| v.as_integer()) {
        info.number_negative_pattern = u8::try_from(pattern)
            .ok()
            .filter(|p| *p <= 4)
            .ok_or_else(|| {
                LocaleError::ParseError(format!("{}: negative_pattern {} out of range", culture, pattern))
            })?;
    }

    Ok(())
}

fn apply_datetime_settings(info: &mut DateTimeFormatInfo, culture: &str, value: &toml::Value) -> Result<()> {
    let table = setting_table(culture, "datetime", value)?;

    if let Some(name) = read_string(table, "calendar") {
        info.calendar = Calendar::from_name(&name)
            .ok_or_else(|| LocaleError::ParseError(format!("{}: unknown calendar {}", culture, name)))?;
    }

    let strings: [(&str, &mut String); 5] = [
        ("am", &mut info.am_designator),
        ("pm", &mut info.pm_designator),
        ("time_separator", &mut info.time_separator),
        ("date_separator", &mut info.date_separator),
        ("month_day", &mut info.month_day_pattern),
    ];
    for (key, field) in strings {
        if let Some(s) = read_string(table, key) {
            *field = s;
        }
    }
    if let Some(s) = read_string(table, "full_date_time") {
        info.full_date_time_pattern = Some(s);
    }

    if let Some(days) = read_names(table, "day_names", Some(&[7]))? {
        if let Ok(array) = days.try_into() {
            info.day_names = array;
        }
    }
    if let Some(days) = read_names(table, "day_abbreviations", Some(&[7]))? {
        if let Ok(array) = days.try_into() {
            info.abbreviated_day_names = array;
        }
    }

    let month_lengths: &[usize] = &[12, 13];
    if let Some(months) = read_names(table, "month_names", Some(month_lengths))? {
        info.month_names = months;
    }
    if let Some(months) = read_names(table, "month_abbreviations", Some(month_lengths))? {
        info.abbreviated_month_names = months;
    }
    if let Some(months) = read_names(table, "genitive_month_names", Some(month_lengths))? {
        info.genitive_month_names = Some(months);
    }
    if let Some(months) = read_names(table, "genitive_month_abbreviations", Some(month_lengths))? {
        info.abbreviated_genitive_month_names = Some(months);
    }
    if let Some(months) = read_names(table, "leap_month_names", Some(&[13]))? {
        info.leap_year_month_names = Some(months);
    }
    if let Some(eras) = read_names(table, "era_names", None)? {
        info.era_names = eras;
    }

    let pattern_lists: [(&str, &mut Vec<String>); 5] = [
        ("short_date", &mut info.short_date_patterns),
        ("long_date", &mut info.long_date_patterns),
        ("short_time", &mut info.short_time_patterns),
        ("long_time", &mut info.long_time_patterns),
        ("year_month", &mut info.year_month_patterns),
    ];
    for (key, field) in pattern_lists {
        if let Some(patterns) = read_names(table, key, None)? {
            if patterns.is_empty() {
                return Err(LocaleError::ParseError(format!("{}: {} is empty", culture, key)));
            }
            *field = patterns;
        }
    }

    if let Some(flag) = table
        .get("japanese_first_year_as_number")
        .and_then(|v| v.as_bool())
    {
        info.format_japanese_first_year_as_number = flag;
    }

    Ok(())
}

/// Get a culture by name (e.g., "en-US"); the empty name is the invariant culture
pub fn get_culture(name: &str) -> Option<CultureInfo> {
    LocaleManager::get().culture(name).cloned()
}

/// Get a culture by Windows locale identifier (e.g., 0x0409 for en-US)
pub fn get_culture_by_code(code: u32) -> Option<CultureInfo> {
    let manager = LocaleManager::get();
    manager
        .resolve_culture_code(code)
        .and_then(|name| manager.culture(name))
        .cloned()
}

/// Number symbols of a culture
///
/// # Arguments
/// * `name` - Culture name such as "fr-FR"
///
/// # Returns
/// The culture's [`NumberFormatInfo`], or `LocaleError::NotFound`
pub fn number_format_info(name: &str) -> Result<NumberFormatInfo> {
    LocaleManager::get()
        .culture(name)
        .map(|c| c.number.clone())
        .ok_or_else(|| LocaleError::NotFound(name.to_string()))
}

/// Date/time names and patterns of a culture
///
/// # Arguments
/// * `name` - Culture name such as "ru-RU"
///
/// # Returns
/// The culture's [`DateTimeFormatInfo`], or `LocaleError::NotFound`
pub fn datetime_format_info(name: &str) -> Result<DateTimeFormatInfo> {
    LocaleManager::get()
        .culture(name)
        .map(|c| c.datetime.clone())
        .ok_or_else(|| LocaleError::NotFound(name.to_string()))
}

/// Names of all bundled cultures, sorted
pub fn available_cultures() -> Vec<String> {
    let mut names: Vec<String> = LocaleManager::get().cultures.keys().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_cultures_load() {
        let names = available_cultures();
        for expected in ["", "en-US", "fr-FR", "he-IL", "ja-JP", "ru-RU"] {
            assert!(names.iter().any(|n| n == expected), "missing {expected:?}");
        }
    }

    #[test]
    fn culture_overrides_invariant() {
        let fr = get_culture("fr-FR").unwrap();
        assert_eq!(fr.number.number_decimal_separator, ",");
        assert_eq!(fr.number.number_group_separator, "\u{202f}");
        assert_eq!(fr.number.positive_sign, "+");
        assert_eq!(fr.datetime.month_name(8, false), "août");
        assert_eq!(fr.datetime.short_date_pattern(), "dd/MM/yyyy");
    }

    #[test]
    fn lookup_by_code() {
        let ja = get_culture_by_code(0x0411).unwrap();
        assert_eq!(ja.name, "ja-JP");
        assert_eq!(ja.datetime.calendar, Calendar::Japanese);
        assert_eq!(get_culture_by_code(0x007F).unwrap().name, "");
        assert!(get_culture_by_code(0xFFFF).is_none());
    }

    #[test]
    fn missing_culture_is_an_error() {
        assert_eq!(
            number_format_info("xx-XX"),
            Err(LocaleError::NotFound("xx-XX".to_string()))
        );
    }

    #[test]
    fn hebrew_culture_has_leap_names() {
        let he = datetime_format_info("he-IL").unwrap();
        assert_eq!(he.calendar, Calendar::Hebrew);
        assert_eq!(he.month_names.len(), 13);
        assert_eq!(he.leap_year_month_name(6), "אדר א");
    }

    #[test]
    fn malformed_names_are_rejected() {
        let mut info = DateTimeFormatInfo::default();
        let value: toml::Value = toml::from_str("day_names = [\"a\", \"b\"]").unwrap();
        assert!(matches!(
            apply_datetime_settings(&mut info, "test", &value),
            Err(LocaleError::ParseError(_))
        ));
    }
}
