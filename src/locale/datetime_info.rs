//! Culture-specific names and patterns consulted by the date/time formatter

use std::sync::OnceLock;

use crate::calendar::Calendar;
use crate::error::FormatError;

/// Pattern behind the round-trip specifier `o`/`O`
pub const ROUND_TRIP_PATTERN: &str = "yyyy'-'MM'-'dd'T'HH':'mm':'ss.fffffffK";
/// Pattern behind the RFC 1123 specifier `r`/`R`
pub const RFC1123_PATTERN: &str = "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'";
/// Pattern behind the sortable specifier `s`
pub const SORTABLE_PATTERN: &str = "yyyy'-'MM'-'dd'T'HH':'mm':'ss";
/// Pattern behind the universal sortable specifier `u`
pub const UNIVERSAL_SORTABLE_PATTERN: &str = "yyyy'-'MM'-'dd HH':'mm':'ss'Z'";

/// Names, separators and standard patterns of one culture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormatInfo {
    /// Calendar used to split dates into era/year/month/day
    pub calendar: Calendar,
    /// Morning designator
    pub am_designator: String,
    /// Afternoon designator
    pub pm_designator: String,
    /// Replacement for `:` in patterns
    pub time_separator: String,
    /// Replacement for `/` in patterns
    pub date_separator: String,
    /// Full day names, Sunday first
    pub day_names: [String; 7],
    /// Abbreviated day names, Sunday first
    pub abbreviated_day_names: [String; 7],
    /// Full month names; 13 entries for calendars with a leap month
    pub month_names: Vec<String>,
    /// Abbreviated month names
    pub abbreviated_month_names: Vec<String>,
    /// Month names used next to a day number, when the language declines them
    pub genitive_month_names: Option<Vec<String>>,
    /// Abbreviated genitive month names
    pub abbreviated_genitive_month_names: Option<Vec<String>>,
    /// Month names used in leap years of lunisolar calendars
    pub leap_year_month_names: Option<Vec<String>>,
    /// Era names indexed by era number minus one
    pub era_names: Vec<String>,
    /// Short date patterns; the first one is the default
    pub short_date_patterns: Vec<String>,
    /// Long date patterns; the first one is the default
    pub long_date_patterns: Vec<String>,
    /// Short time patterns; the first one is the default
    pub short_time_patterns: Vec<String>,
    /// Long time patterns; the first one is the default
    pub long_time_patterns: Vec<String>,
    /// Year/month patterns; the first one is the default
    pub year_month_patterns: Vec<String>,
    /// Month/day pattern
    pub month_day_pattern: String,
    /// Full date and time pattern, defaults to long date + long time
    pub full_date_time_pattern: Option<String>,
    /// Print the first year of a Japanese era as a number instead of 元
    pub format_japanese_first_year_as_number: bool,
}

fn strings<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for DateTimeFormatInfo {
    fn default() -> Self {
        Self {
            calendar: Calendar::Gregorian,
            am_designator: "AM".to_string(),
            pm_designator: "PM".to_string(),
            time_separator: ":".to_string(),
            date_separator: "/".to_string(),
            day_names: [
                "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
            ]
            .map(String::from),
            abbreviated_day_names: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .map(String::from),
            month_names: strings([
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ]),
            abbreviated_month_names: strings([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            genitive_month_names: None,
            abbreviated_genitive_month_names: None,
            leap_year_month_names: None,
            era_names: strings(["A.D."]),
            short_date_patterns: strings(["MM/dd/yyyy", "yyyy-MM-dd"]),
            long_date_patterns: strings(["dddd, dd MMMM yyyy"]),
            short_time_patterns: strings(["HH:mm", "hh:mm tt", "H:mm", "h:mm tt"]),
            long_time_patterns: strings(["HH:mm:ss"]),
            year_month_patterns: strings(["yyyy MMMM"]),
            month_day_pattern: "MMMM dd".to_string(),
            full_date_time_pattern: None,
            format_japanese_first_year_as_number: false,
        }
    }
}

static INVARIANT: OnceLock<DateTimeFormatInfo> = OnceLock::new();

fn first_or_empty(patterns: &[String]) -> &str {
    patterns.first().map(String::as_str).unwrap_or("")
}

fn combine(first: &[String], second: &[String]) -> Vec<String> {
    first
        .iter()
        .flat_map(|a| second.iter().map(move |b| format!("{a} {b}")))
        .collect()
}

impl DateTimeFormatInfo {
    /// Culture-independent names and patterns
    pub fn invariant() -> &'static DateTimeFormatInfo {
        INVARIANT.get_or_init(DateTimeFormatInfo::default)
    }

    /// Default short date pattern (`d`)
    pub fn short_date_pattern(&self) -> &str {
        first_or_empty(&self.short_date_patterns)
    }

    /// Default long date pattern (`D`)
    pub fn long_date_pattern(&self) -> &str {
        first_or_empty(&self.long_date_patterns)
    }

    /// Default short time pattern (`t`)
    pub fn short_time_pattern(&self) -> &str {
        first_or_empty(&self.short_time_patterns)
    }

    /// Default long time pattern (`T`)
    pub fn long_time_pattern(&self) -> &str {
        first_or_empty(&self.long_time_patterns)
    }

    /// Default year/month pattern (`y`)
    pub fn year_month_pattern(&self) -> &str {
        first_or_empty(&self.year_month_patterns)
    }

    /// Full date and time pattern (`F`, `U`)
    pub fn full_date_time_pattern(&self) -> String {
        match &self.full_date_time_pattern {
            Some(pattern) => pattern.clone(),
            None => format!("{} {}", self.long_date_pattern(), self.long_time_pattern()),
        }
    }

    /// Short date plus short time (`g`)
    pub fn general_short_time_pattern(&self) -> String {
        format!("{} {}", self.short_date_pattern(), self.short_time_pattern())
    }

    /// Short date plus long time (`G`)
    pub fn general_long_time_pattern(&self) -> String {
        format!("{} {}", self.short_date_pattern(), self.long_time_pattern())
    }

    /// Default pattern for offset-bearing values
    pub fn date_time_offset_pattern(&self) -> String {
        format!("{} {} zzz", self.short_date_pattern(), self.long_time_pattern())
    }

    /// Every pattern a standard specifier can expand to
    pub fn all_patterns(&self, specifier: char) -> Result<Vec<String>, FormatError> {
        let patterns = match specifier {
            'd' => self.short_date_patterns.clone(),
            'D' => self.long_date_patterns.clone(),
            'f' => combine(&self.long_date_patterns, &self.short_time_patterns),
            'F' | 'U' => combine(&self.long_date_patterns, &self.long_time_patterns),
            'g' => combine(&self.short_date_patterns, &self.short_time_patterns),
            'G' => combine(&self.short_date_patterns, &self.long_time_patterns),
            'm' | 'M' => vec![self.month_day_pattern.clone()],
            'o' | 'O' => vec![ROUND_TRIP_PATTERN.to_string()],
            'r' | 'R' => vec![RFC1123_PATTERN.to_string()],
            's' => vec![SORTABLE_PATTERN.to_string()],
            't' => self.short_time_patterns.clone(),
            'T' => self.long_time_patterns.clone(),
            'u' => vec![UNIVERSAL_SORTABLE_PATTERN.to_string()],
            'y' | 'Y' => self.year_month_patterns.clone(),
            other => return Err(FormatError::UnknownSpecifier(other)),
        };
        Ok(patterns)
    }

    /// Full name of a day, 0 = Sunday
    pub fn day_name(&self, day_of_week: u32) -> &str {
        self.day_names
            .get(day_of_week as usize)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Abbreviated name of a day, 0 = Sunday
    pub fn abbreviated_day_name(&self, day_of_week: u32) -> &str {
        self.abbreviated_day_names
            .get(day_of_week as usize)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Nominative month name, 1-based
    pub fn month_name(&self, month: u32, abbreviated: bool) -> &str {
        let names = if abbreviated {
            &self.abbreviated_month_names
        } else {
            &self.month_names
        };
        name_at(names, month)
    }

    /// Genitive month name, falling back to the nominative form
    pub fn genitive_month_name(&self, month: u32, abbreviated: bool) -> &str {
        let names = if abbreviated {
            &self.abbreviated_genitive_month_names
        } else {
            &self.genitive_month_names
        };
        match names {
            Some(names) => name_at(names, month),
            None => self.month_name(month, abbreviated),
        }
    }

    /// Leap-year month name, falling back to the regular table
    pub fn leap_year_month_name(&self, month: u32) -> &str {
        match &self.leap_year_month_names {
            Some(names) => name_at(names, month),
            None => self.month_name(month, false),
        }
    }

    /// Era name, 1-based
    pub fn era_name(&self, era: usize) -> &str {
        era.checked_sub(1)
            .and_then(|index| self.era_names.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True when the culture declines month names next to a day number
    pub fn uses_genitive_month_names(&self) -> bool {
        self.genitive_month_names.is_some()
    }

    /// Builder method to set the AM/PM designators
    pub fn with_designators(mut self, am: &str, pm: &str) -> Self {
        self.am_designator = am.to_string();
        self.pm_designator = pm.to_string();
        self
    }

    /// Builder method to set the time and date separators
    pub fn with_separators(mut self, time: &str, date: &str) -> Self {
        self.time_separator = time.to_string();
        self.date_separator = date.to_string();
        self
    }

    /// Builder method to change the calendar
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Builder method to set the month names
    pub fn with_month_names(mut self, full: Vec<String>, abbreviated: Vec<String>) -> Self {
        self.month_names = full;
        self.abbreviated_month_names = abbreviated;
        self
    }

    /// Builder method to set the genitive month names
    pub fn with_genitive_month_names(mut self, full: Vec<String>, abbreviated: Vec<String>) -> Self {
        self.genitive_month_names = Some(full);
        self.abbreviated_genitive_month_names = Some(abbreviated);
        self
    }

    /// Builder method to set the era names
    pub fn with_era_names(mut self, names: Vec<String>) -> Self {
        self.era_names = names;
        self
    }

    /// Builder method to replace the default short date and long time patterns
    pub fn with_default_patterns(mut self, short_date: &str, long_time: &str) -> Self {
        set_default(&mut self.short_date_patterns, short_date);
        set_default(&mut self.long_time_patterns, long_time);
        self
    }

    /// Builder method to toggle numeric first years of Japanese eras
    pub fn with_japanese_first_year_as_number(mut self, enabled: bool) -> Self {
        self.format_japanese_first_year_as_number = enabled;
        self
    }
}

fn name_at(names: &[String], month: u32) -> &str {
    (month as usize)
        .checked_sub(1)
        .and_then(|index| names.get(index))
        .map(String::as_str)
        .unwrap_or("")
}

fn set_default(patterns: &mut Vec<String>, pattern: &str) {
    patterns.retain(|p| p != pattern);
    patterns.insert(0, pattern.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_patterns() {
        let info = DateTimeFormatInfo::invariant();
        assert_eq!(info.full_date_time_pattern(), "dddd, dd MMMM yyyy HH:mm:ss");
        assert_eq!(info.general_long_time_pattern(), "MM/dd/yyyy HH:mm:ss");
        assert_eq!(info.date_time_offset_pattern(), "MM/dd/yyyy HH:mm:ss zzz");
    }

    #[test]
    fn all_patterns_combines_lists() {
        let info = DateTimeFormatInfo::default();
        let g = info.all_patterns('g').unwrap();
        assert_eq!(g.len(), 8);
        assert_eq!(g[0], "MM/dd/yyyy HH:mm");
        assert_eq!(info.all_patterns('s').unwrap(), vec![SORTABLE_PATTERN.to_string()]);
        assert_eq!(info.all_patterns('x'), Err(FormatError::UnknownSpecifier('x')));
    }

    #[test]
    fn genitive_falls_back_to_nominative() {
        let info = DateTimeFormatInfo::default();
        assert_eq!(info.genitive_month_name(3, false), "March");
        assert_eq!(info.month_name(13, false), "");
    }

    #[test]
    fn default_pattern_builder_moves_to_front() {
        let info = DateTimeFormatInfo::default().with_default_patterns("yyyy-MM-dd", "HH:mm:ss");
        assert_eq!(info.short_date_pattern(), "yyyy-MM-dd");
        assert_eq!(info.short_date_patterns.len(), 2);
    }
}
