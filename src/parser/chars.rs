//! Character classes and culture-string matching shared by the parse paths

use crate::locale::NumberFormatInfo;

/// Whitespace accepted around numbers: U+0009..=U+000D and U+0020
pub(crate) fn is_white(c: char) -> bool {
    c == ' ' || ('\t'..='\r').contains(&c)
}

pub(crate) fn is_white_byte(b: u8) -> bool {
    b == b' ' || (b'\t'..=b'\r').contains(&b)
}

/// Character at byte offset `pos`, or NUL past the end
pub(crate) fn char_at(text: &str, pos: usize) -> char {
    text.get(pos..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or('\0')
}

/// True if everything from `pos` on is NUL padding
pub(crate) fn trailing_zeros(text: &str, pos: usize) -> bool {
    text.get(pos..)
        .is_some_and(|rest| rest.chars().all(|c| c == '\0'))
}

/// Match a culture string at `pos`, returning the offset just past it.
///
/// A no-break space (U+00A0) or narrow no-break space (U+202F) in the
/// culture string also matches an ASCII space in the input. An empty
/// culture string never matches.
pub(crate) fn match_chars(text: &str, pos: usize, expected: &str) -> Option<usize> {
    if expected.is_empty() {
        return None;
    }
    let rest = text.get(pos..)?;
    let mut input = rest.char_indices();
    for want in expected.chars() {
        let (_, got) = input.next()?;
        let space_alias = got == ' ' && matches!(want, '\u{a0}' | '\u{202f}');
        if got != want && !space_alias {
            return None;
        }
    }
    let consumed = input.next().map_or(rest.len(), |(offset, _)| offset);
    Some(pos + consumed)
}

/// Match the culture negative sign, or an ASCII '-' when the sign is hyphen-like
pub(crate) fn match_negative_sign(text: &str, pos: usize, info: &NumberFormatInfo) -> Option<usize> {
    match_chars(text, pos, &info.negative_sign).or_else(|| {
        (info.allow_hyphen_during_parsing() && char_at(text, pos) == '-').then_some(pos + 1)
    })
}

/// Uppercase-folding comparison used for the infinity and NaN symbols
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_uppercase)
        .eq(b.chars().flat_map(char::to_uppercase))
}

/// Strip `prefix` from `text` ignoring case
pub(crate) fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let mut chars = text.char_indices();
    for want in prefix.chars() {
        let (_, got) = chars.next()?;
        if !got.to_uppercase().eq(want.to_uppercase()) {
            return None;
        }
    }
    let consumed = chars.next().map_or(text.len(), |(offset, _)| offset);
    Some(&text[consumed..])
}
