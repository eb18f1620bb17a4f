//! Custom pattern interpretation
//!
//! Each field letter maps to an emitter through [`FIELD_HANDLERS`]. Emitters
//! share a [`FieldContext`] that carries the value, the culture data, the
//! optional explicit offset and the calendar date, which is computed on first
//! use so time-only patterns never touch the calendar.

use chrono::{Datelike, FixedOffset, Offset, Timelike, Utc};

use super::clock;
use super::hebrew_number::append_hebrew_number;
use super::lexer::{self, PatternToken};
use crate::calendar::{Calendar, CalendarDate};
use crate::error::FormatError;
use crate::locale::DateTimeFormatInfo;
use crate::types::{DateTimeKind, DateTimeValue, TICKS_PER_SECOND};

/// Year suffix that turns era-year 1 into the first-year glyph
const CJK_YEAR_SUFFIX: char = '年';
const JAPANESE_FIRST_YEAR: &str = "元";
/// Widest zero padding a year field gets
const MAX_YEAR_WIDTH: usize = 16;

/// A field run located in the pattern
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    pub letter: char,
    pub repeat: usize,
    /// Byte offset of the run in the pattern
    pub start: usize,
}

pub(crate) struct FieldContext<'a> {
    value: &'a DateTimeValue,
    info: &'a DateTimeFormatInfo,
    offset: Option<FixedOffset>,
    pattern: &'a str,
    date: Option<CalendarDate>,
    /// Cleared once a day, month or year field has been written
    time_only: bool,
}

impl<'a> FieldContext<'a> {
    fn new(
        value: &'a DateTimeValue,
        info: &'a DateTimeFormatInfo,
        offset: Option<FixedOffset>,
        pattern: &'a str,
    ) -> Self {
        Self {
            value,
            info,
            offset,
            pattern,
            date: None,
            time_only: true,
        }
    }

    fn calendar_date(&mut self) -> Result<CalendarDate, FormatError> {
        if let Some(date) = self.date {
            return Ok(date);
        }
        let date = self.info.calendar.date(self.value.naive().date())?;
        self.date = Some(date);
        Ok(date)
    }

    fn is_hebrew(&self) -> bool {
        self.info.calendar == Calendar::Hebrew
    }
}

type FieldHandler = fn(&mut FieldContext<'_>, Field, &mut String) -> Result<(), FormatError>;

static FIELD_HANDLERS: &[(char, FieldHandler)] = &[
    ('h', hour_12),
    ('H', hour_24),
    ('m', minute),
    ('s', second),
    ('f', fraction),
    ('F', fraction),
    ('t', designator),
    ('d', day),
    ('M', month),
    ('y', year),
    ('z', time_zone),
    ('K', round_trip_zone),
    ('g', era),
    (':', time_separator),
    ('/', date_separator),
];

fn handler_for(letter: char) -> Option<FieldHandler> {
    FIELD_HANDLERS
        .iter()
        .find(|(c, _)| *c == letter)
        .map(|(_, handler)| *handler)
}

fn push_padded(out: &mut String, value: i64, width: usize) {
    out.push_str(&format!("{value:0width$}"));
}

/// Digits padded to the repeat count, at most two wide
fn push_two_digit(out: &mut String, value: u32, repeat: usize) {
    push_padded(out, value as i64, repeat.min(2));
}

fn hour_12(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    let hour = match ctx.value.naive().hour() % 12 {
        0 => 12,
        h => h,
    };
    push_two_digit(out, hour, field.repeat);
    Ok(())
}

fn hour_24(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    push_two_digit(out, ctx.value.naive().hour(), field.repeat);
    Ok(())
}

fn minute(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    push_two_digit(out, ctx.value.naive().minute(), field.repeat);
    Ok(())
}

fn second(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    push_two_digit(out, ctx.value.naive().second(), field.repeat);
    Ok(())
}

fn fraction(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    if field.repeat > lexer::MAX_FRACTION_DIGITS {
        return Err(FormatError::FractionTooLong(field.repeat));
    }
    let divisor = 10_i64.pow((lexer::MAX_FRACTION_DIGITS - field.repeat) as u32);
    let mut digits = ctx.value.sub_second_ticks() as i64 % TICKS_PER_SECOND / divisor;

    if field.letter == 'f' {
        push_padded(out, digits, field.repeat);
        return Ok(());
    }

    let mut width = field.repeat;
    while width > 0 && digits % 10 == 0 {
        digits /= 10;
        width -= 1;
    }
    if width > 0 {
        push_padded(out, digits, width);
    } else if out.ends_with('.') {
        out.pop();
    }
    Ok(())
}

fn designator(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    let designator = if ctx.value.naive().hour() < 12 {
        &ctx.info.am_designator
    } else {
        &ctx.info.pm_designator
    };
    if field.repeat == 1 {
        out.extend(designator.chars().next());
    } else {
        out.push_str(designator);
    }
    Ok(())
}

fn day(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    if field.repeat <= 2 {
        let date = ctx.calendar_date()?;
        if ctx.is_hebrew() {
            append_hebrew_number(out, date.day as i32);
        } else {
            push_two_digit(out, date.day, field.repeat);
        }
    } else {
        let weekday = ctx.value.naive().weekday().num_days_from_sunday();
        let name = if field.repeat == 3 {
            ctx.info.abbreviated_day_name(weekday)
        } else {
            ctx.info.day_name(weekday)
        };
        out.push_str(name);
    }
    ctx.time_only = false;
    Ok(())
}

/// Whether a month name at `start` sits next to a one- or two-letter day
/// number. The nearest `d` before the run is checked first, then the nearest
/// one after it.
pub(crate) fn is_genitive_context(pattern: &str, start: usize, repeat: usize) -> bool {
    let chars: Vec<char> = pattern.chars().collect();
    let index = pattern.get(..start).map_or(0, |head| head.chars().count());

    if let Some(found) = chars[..index.min(chars.len())].iter().rposition(|c| *c == 'd') {
        let run_before = chars[..found].iter().rev().take_while(|c| **c == 'd').count();
        if run_before <= 1 {
            return true;
        }
    }

    let after_run = (index + repeat).min(chars.len());
    if let Some(found) = chars[after_run..].iter().position(|c| *c == 'd') {
        let found = after_run + found;
        let run_after = chars[found + 1..].iter().take_while(|c| **c == 'd').count();
        if run_after <= 1 {
            return true;
        }
    }
    false
}

fn month(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    let date = ctx.calendar_date()?;
    let info = ctx.info;
    let abbreviated = field.repeat == 3;

    if field.repeat <= 2 {
        if ctx.is_hebrew() {
            append_hebrew_number(out, date.month as i32);
        } else {
            push_two_digit(out, date.month, field.repeat);
        }
    } else if ctx.is_hebrew() {
        if date.leap_year {
            out.push_str(info.leap_year_month_name(date.month));
        } else {
            // Regular years skip the second Adar slot of the name table
            let month = if date.month >= 7 { date.month + 1 } else { date.month };
            out.push_str(info.month_name(month, abbreviated));
        }
    } else if info.uses_genitive_month_names()
        && is_genitive_context(ctx.pattern, field.start, field.repeat)
    {
        out.push_str(info.genitive_month_name(date.month, abbreviated));
    } else {
        out.push_str(info.month_name(date.month, abbreviated));
    }
    ctx.time_only = false;
    Ok(())
}

fn followed_by_year_suffix(pattern: &str, field: Field) -> bool {
    let rest = pattern.get(field.start + field.repeat..).unwrap_or("");
    let rest = rest.strip_prefix('\'').unwrap_or(rest);
    rest.starts_with(CJK_YEAR_SUFFIX)
}

fn year(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    let date = ctx.calendar_date()?;
    let calendar = ctx.info.calendar;

    if calendar == Calendar::Japanese
        && !ctx.info.format_japanese_first_year_as_number
        && date.year == 1
        && followed_by_year_suffix(ctx.pattern, field)
    {
        out.push_str(JAPANESE_FIRST_YEAR);
    } else if calendar.forces_two_digit_years() {
        push_padded(out, date.year as i64, field.repeat.min(2));
    } else if calendar == Calendar::Hebrew {
        append_hebrew_number(out, date.year);
    } else if field.repeat <= 2 {
        push_padded(out, (date.year % 100) as i64, field.repeat);
    } else {
        push_padded(out, date.year as i64, field.repeat.min(MAX_YEAR_WIDTH));
    }
    ctx.time_only = false;
    Ok(())
}

/// Append `offset` as a sign, hours and (for `with_minutes`) `:MM`
fn push_offset(out: &mut String, offset: FixedOffset, hour_width: usize, with_minutes: bool) {
    let seconds = offset.local_minus_utc();
    out.push(if seconds < 0 { '-' } else { '+' });
    let seconds = seconds.unsigned_abs();
    push_padded(out, (seconds / 3600) as i64, hour_width);
    if with_minutes {
        out.push(':');
        push_padded(out, (seconds % 3600 / 60) as i64, 2);
    }
}

fn time_zone(ctx: &mut FieldContext<'_>, field: Field, out: &mut String) -> Result<(), FormatError> {
    let offset = match ctx.offset {
        Some(offset) => offset,
        None if ctx.time_only && ctx.value.is_time_of_day_only() => clock::current_offset(),
        None if ctx.value.kind() == DateTimeKind::Utc => Utc.fix(),
        None => clock::offset_at(ctx.value.naive()),
    };
    let hour_width = if field.repeat <= 1 { 1 } else { 2 };
    push_offset(out, offset, hour_width, field.repeat >= 3);
    Ok(())
}

fn round_trip_zone(ctx: &mut FieldContext<'_>, _field: Field, out: &mut String) -> Result<(), FormatError> {
    let offset = match (ctx.offset, ctx.value.kind()) {
        (Some(offset), _) => offset,
        (None, DateTimeKind::Local) => clock::offset_at(ctx.value.naive()),
        (None, DateTimeKind::Utc) => {
            out.push('Z');
            return Ok(());
        }
        (None, DateTimeKind::Unspecified) => return Ok(()),
    };
    push_offset(out, offset, 2, true);
    Ok(())
}

fn era(ctx: &mut FieldContext<'_>, _field: Field, out: &mut String) -> Result<(), FormatError> {
    let date = ctx.calendar_date()?;
    out.push_str(ctx.info.era_name(date.era));
    Ok(())
}

fn time_separator(ctx: &mut FieldContext<'_>, _field: Field, out: &mut String) -> Result<(), FormatError> {
    out.push_str(&ctx.info.time_separator);
    Ok(())
}

fn date_separator(ctx: &mut FieldContext<'_>, _field: Field, out: &mut String) -> Result<(), FormatError> {
    out.push_str(&ctx.info.date_separator);
    Ok(())
}

/// Interpret a custom pattern, appending the result to `out`
///
/// The pattern is lexed completely before anything is written, so
/// malformed patterns leave `out` untouched; calendar errors may still
/// stop output part way through.
pub(crate) fn format_custom(
    value: &DateTimeValue,
    pattern: &str,
    info: &DateTimeFormatInfo,
    offset: Option<FixedOffset>,
    out: &mut String,
) -> Result<(), FormatError> {
    let lexemes = lexer::lex(pattern)?;
    let mut ctx = FieldContext::new(value, info, offset, pattern);

    for lexeme in lexemes {
        match lexeme.token {
            PatternToken::Field { letter, repeat } => {
                let handler = handler_for(letter).ok_or(FormatError::InvalidString)?;
                let field = Field {
                    letter,
                    repeat,
                    start: lexeme.start,
                };
                handler(&mut ctx, field, out)?;
            }
            PatternToken::Quoted(text) => out.push_str(&text),
            PatternToken::Escaped(c) | PatternToken::Literal(c) => out.push(c),
            PatternToken::Single(c) => {
                let mut buf = [0u8; 4];
                format_custom(value, c.encode_utf8(&mut buf), info, offset, out)?;
            }
        }
    }
    Ok(())
}
