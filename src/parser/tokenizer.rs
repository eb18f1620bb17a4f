//! General number grammar
//!
//! Accepts, in order: optional leading white, sign, `(` and currency symbol;
//! digits with decimal and group separators; an optional exponent; then
//! trailing white, sign, `)` and currency symbol. The result is a
//! [`NumberBuffer`] for the type-specific converters.

use super::buffer::{NumberBuffer, NumberBufferKind};
use super::chars::{char_at, is_white, match_chars, match_negative_sign, trailing_zeros};
use crate::locale::NumberFormatInfo;
use crate::types::NumberStyles;

/// Exponents beyond this are clamped and the remaining digits skipped
const MAX_EXPONENT_ACCUMULATION: i32 = 1000;
const CLAMPED_EXPONENT: i32 = 9999;

#[derive(Debug, Default)]
struct State {
    sign: bool,
    parens: bool,
    digits: bool,
    non_zero: bool,
    decimal: bool,
    currency: bool,
}

/// Separator set in effect for one parse
struct Separators<'a> {
    decimal: &'a str,
    group: &'a str,
    currency_mode: bool,
}

impl<'a> Separators<'a> {
    fn new(styles: NumberStyles, info: &'a NumberFormatInfo) -> Self {
        if styles.contains(NumberStyles::ALLOW_CURRENCY_SYMBOL) {
            Self {
                decimal: &info.currency_decimal_separator,
                group: &info.currency_group_separator,
                currency_mode: true,
            }
        } else {
            Self {
                decimal: &info.number_decimal_separator,
                group: &info.number_group_separator,
                currency_mode: false,
            }
        }
    }

    /// In currency mode the plain-number separators are accepted as long
    /// as no currency symbol has been seen
    fn match_separator(
        &self,
        text: &str,
        pos: usize,
        primary: &str,
        fallback: &str,
        state: &State,
    ) -> Option<usize> {
        match_chars(text, pos, primary).or_else(|| {
            if self.currency_mode && !state.currency {
                match_chars(text, pos, fallback)
            } else {
                None
            }
        })
    }
}

/// Run the grammar over `text`, filling `number`.
///
/// # Returns
/// The byte offset where parsing stopped, or `None` if the grammar failed
pub(crate) fn try_parse_number(
    text: &str,
    styles: NumberStyles,
    number: &mut NumberBuffer,
    info: &NumberFormatInfo,
) -> Option<usize> {
    let separators = Separators::new(styles, info);
    let mut currency_symbol = styles
        .contains(NumberStyles::ALLOW_CURRENCY_SYMBOL)
        .then_some(info.currency_symbol.as_str());
    let mut state = State::default();
    let mut pos = 0;

    // Leading white, sign, parenthesis and currency symbol
    loop {
        let ch = char_at(text, pos);
        let skip_white = is_white(ch)
            && styles.contains(NumberStyles::ALLOW_LEADING_WHITE)
            && (!state.sign || state.currency || info.number_negative_pattern == 2);
        if skip_white {
            pos += 1;
            continue;
        }

        if styles.contains(NumberStyles::ALLOW_LEADING_SIGN) && !state.sign {
            if let Some(next) = match_chars(text, pos, &info.positive_sign) {
                state.sign = true;
                pos = next;
                continue;
            }
            if let Some(next) = match_negative_sign(text, pos, info) {
                state.sign = true;
                number.set_negative(true);
                pos = next;
                continue;
            }
        }
        if ch == '(' && styles.contains(NumberStyles::ALLOW_PARENTHESES) && !state.sign {
            state.sign = true;
            state.parens = true;
            number.set_negative(true);
            pos += 1;
            continue;
        }
        if let Some(symbol) = currency_symbol {
            if let Some(next) = match_chars(text, pos, symbol) {
                state.currency = true;
                currency_symbol = None;
                pos = next;
                continue;
            }
        }
        break;
    }

    let max_digits = number.capacity();
    let mut digit_count = 0usize;
    let mut digit_end = 0usize;
    let mut trailing_zero_count = 0usize;

    // Digits and separators
    loop {
        let ch = char_at(text, pos);
        if ch.is_ascii_digit() {
            state.digits = true;
            if ch != '0' || state.non_zero {
                if digit_count < max_digits {
                    number.push_digit(ch as u8);
                    if ch != '0' || number.kind() != NumberBufferKind::Integer {
                        digit_end = digit_count + 1;
                    }
                    if ch == '0' {
                        trailing_zero_count += 1;
                    } else {
                        trailing_zero_count = 0;
                    }
                } else if ch != '0' {
                    number.mark_non_zero_tail();
                }
                if !state.decimal {
                    number.shift_scale(1);
                }
                digit_count += 1;
                state.non_zero = true;
            } else if state.decimal {
                number.shift_scale(-1);
            }
            pos += 1;
            continue;
        }

        if styles.contains(NumberStyles::ALLOW_DECIMAL_POINT) && !state.decimal {
            let matched = separators.match_separator(
                text,
                pos,
                separators.decimal,
                &info.number_decimal_separator,
                &state,
            );
            if let Some(next) = matched {
                state.decimal = true;
                pos = next;
                continue;
            }
        }
        if styles.contains(NumberStyles::ALLOW_THOUSANDS) && state.digits && !state.decimal {
            let matched = separators.match_separator(
                text,
                pos,
                separators.group,
                &info.number_group_separator,
                &state,
            );
            if let Some(next) = matched {
                pos = next;
                continue;
            }
        }
        break;
    }

    number.truncate(digit_end);
    if !state.digits {
        return None;
    }

    // Exponent
    let ch = char_at(text, pos);
    if (ch == 'E' || ch == 'e') && styles.contains(NumberStyles::ALLOW_EXPONENT) {
        let exponent_start = pos;
        pos += 1;
        let mut negative_exponent = false;
        if let Some(next) = match_chars(text, pos, &info.positive_sign) {
            pos = next;
        } else if let Some(next) = match_negative_sign(text, pos, info) {
            pos = next;
            negative_exponent = true;
        }

        if char_at(text, pos).is_ascii_digit() {
            let mut exponent = 0i32;
            while let Some(digit) = char_at(text, pos).to_digit(10) {
                exponent = exponent * 10 + digit as i32;
                pos += 1;
                if exponent > MAX_EXPONENT_ACCUMULATION {
                    exponent = CLAMPED_EXPONENT;
                    while char_at(text, pos).is_ascii_digit() {
                        pos += 1;
                    }
                }
            }
            if negative_exponent {
                exponent = -exponent;
            }
            number.shift_scale(exponent);
        } else {
            // Not an exponent after all, leave the 'E' for the trailing checks
            pos = exponent_start;
        }
    }

    if number.kind() == NumberBufferKind::FloatingPoint && !number.has_non_zero_tail() {
        let fractional = digit_end as i64 - number.scale() as i64;
        if fractional > 0 {
            let trimmed = (trailing_zero_count as i64).min(fractional) as usize;
            number.truncate(digit_end - trimmed);
        }
    }

    // Trailing white, sign, parenthesis and currency symbol
    loop {
        let ch = char_at(text, pos);
        if is_white(ch) && styles.contains(NumberStyles::ALLOW_TRAILING_WHITE) {
            pos += 1;
            continue;
        }

        if styles.contains(NumberStyles::ALLOW_TRAILING_SIGN) && !state.sign {
            if let Some(next) = match_chars(text, pos, &info.positive_sign) {
                state.sign = true;
                pos = next;
                continue;
            }
            if let Some(next) = match_negative_sign(text, pos, info) {
                state.sign = true;
                number.set_negative(true);
                pos = next;
                continue;
            }
        }
        if ch == ')' && state.parens {
            state.parens = false;
            pos += 1;
            continue;
        }
        if let Some(symbol) = currency_symbol {
            if let Some(next) = match_chars(text, pos, symbol) {
                currency_symbol = None;
                pos = next;
                continue;
            }
        }
        break;
    }

    if state.parens {
        return None;
    }

    if !state.non_zero {
        if number.kind() != NumberBufferKind::Decimal {
            number.reset_scale();
        }
        if number.kind() == NumberBufferKind::Integer && !state.decimal {
            number.set_negative(false);
        }
    }
    Some(pos)
}

/// Tokenize the whole of `text`; anything after the number must be NUL padding
pub(crate) fn try_string_to_number(
    text: &str,
    styles: NumberStyles,
    number: &mut NumberBuffer,
    info: &NumberFormatInfo,
) -> bool {
    match try_parse_number(text, styles, number, info) {
        Some(end) => end == text.len() || trailing_zeros(text, end),
        None => false,
    }
}
