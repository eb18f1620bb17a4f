//! Custom date/time pattern lexer
//!
//! Splits a pattern into field runs, quoted literals, `\` escapes, `%`
//! single-field markers and plain literal characters.

use winnow::combinator::{alt, cut_err};
use winnow::error::{ContextError, ErrMode};
use winnow::token::{any, one_of};
use winnow::{ModalResult, Parser};

use crate::error::FormatError;

/// Field letters whose repeat count selects the output form
const RUN_FIELDS: &[char] = &['g', 'h', 'H', 'm', 's', 'f', 'F', 't', 'd', 'M', 'y', 'z'];
/// Field letters handled one character at a time
const SINGLE_FIELDS: &[char] = &['K', ':', '/'];
const QUOTES: &[char] = &['\'', '"'];
/// Longest `f`/`F` run
pub(crate) const MAX_FRACTION_DIGITS: usize = 7;

type LexError = ContextError<FormatError>;
type LexResult<T> = ModalResult<T, LexError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PatternToken {
    /// A field letter repeated `repeat` times
    Field { letter: char, repeat: usize },
    /// Text between quotes, escapes resolved
    Quoted(String),
    /// Character after a `\`
    Escaped(char),
    /// Character after a `%`, formatted as a one-character custom pattern
    Single(char),
    /// Any other character
    Literal(char),
}

/// A token and its byte offset in the pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lexeme {
    pub start: usize,
    pub token: PatternToken,
}

/// Number of times `letter` repeats at the start of `rest`
pub(crate) fn repeat_count(rest: &str, letter: char) -> usize {
    rest.chars().take_while(|c| *c == letter).count()
}

fn char_in(input: &mut &str, set: &[char]) -> LexResult<char> {
    one_of(set).parse_next(input)
}

fn next_char(input: &mut &str, context: FormatError) -> LexResult<char> {
    cut_err(any).context(context).parse_next(input)
}

fn field_run(input: &mut &str) -> LexResult<PatternToken> {
    let letter = char_in(input, RUN_FIELDS)?;
    let more = repeat_count(input, letter);
    *input = &input[more * letter.len_utf8()..];
    Ok(PatternToken::Field {
        letter,
        repeat: 1 + more,
    })
}

fn single_field(input: &mut &str) -> LexResult<PatternToken> {
    one_of(SINGLE_FIELDS)
        .map(|letter| PatternToken::Field { letter, repeat: 1 })
        .parse_next(input)
}

fn quoted(input: &mut &str) -> LexResult<PatternToken> {
    let quote = char_in(input, QUOTES)?;
    let mut text = String::new();
    loop {
        match next_char(input, FormatError::UnterminatedQuote(quote))? {
            c if c == quote => break,
            '\\' => text.push(next_char(input, FormatError::TrailingEscape)?),
            c => text.push(c),
        }
    }
    Ok(PatternToken::Quoted(text))
}

fn escaped(input: &mut &str) -> LexResult<PatternToken> {
    char_in(input, &['\\'])?;
    next_char(input, FormatError::TrailingEscape).map(PatternToken::Escaped)
}

fn single(input: &mut &str) -> LexResult<PatternToken> {
    char_in(input, &['%'])?;
    cut_err(any.verify(|c: &char| *c != '%'))
        .context(FormatError::InvalidPercent)
        .map(PatternToken::Single)
        .parse_next(input)
}

fn literal(input: &mut &str) -> LexResult<PatternToken> {
    any.map(PatternToken::Literal).parse_next(input)
}

fn into_format_error(error: ErrMode<LexError>) -> FormatError {
    match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e
            .context()
            .next()
            .cloned()
            .unwrap_or(FormatError::InvalidString),
        ErrMode::Incomplete(_) => FormatError::InvalidString,
    }
}

/// Lex a whole pattern, rejecting it before any output is produced
pub(crate) fn lex(pattern: &str) -> Result<Vec<Lexeme>, FormatError> {
    let mut input = pattern;
    let mut lexemes = Vec::new();

    while !input.is_empty() {
        let start = pattern.len() - input.len();
        let token = alt((field_run, single_field, quoted, escaped, single, literal))
            .parse_next(&mut input)
            .map_err(into_format_error)?;

        if let PatternToken::Field { letter: 'f' | 'F', repeat } = token {
            if repeat > MAX_FRACTION_DIGITS {
                return Err(FormatError::FractionTooLong(repeat));
            }
        }
        lexemes.push(Lexeme { start, token });
    }

    Ok(lexemes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(pattern: &str) -> Vec<PatternToken> {
        lex(pattern).unwrap().into_iter().map(|l| l.token).collect()
    }

    fn field(letter: char, repeat: usize) -> PatternToken {
        PatternToken::Field { letter, repeat }
    }

    #[test]
    fn runs_and_literals() {
        assert_eq!(
            tokens("yyyy-MM-dd"),
            vec![
                field('y', 4),
                PatternToken::Literal('-'),
                field('M', 2),
                PatternToken::Literal('-'),
                field('d', 2),
            ]
        );
    }

    #[test]
    fn single_fields_do_not_merge() {
        assert_eq!(tokens("KK"), vec![field('K', 1), field('K', 1)]);
        assert_eq!(tokens("::"), vec![field(':', 1), field(':', 1)]);
    }

    #[test]
    fn offsets_are_recorded() {
        let lexemes = lex("'a'MMM").unwrap();
        assert_eq!(lexemes[1].start, 3);
    }

    #[test]
    fn quotes_and_escapes() {
        assert_eq!(
            tokens("'minute:' mm\\\""),
            vec![
                PatternToken::Quoted("minute:".to_string()),
                PatternToken::Literal(' '),
                field('m', 2),
                PatternToken::Escaped('"'),
            ]
        );
        assert_eq!(tokens("'it\\'s'"), vec![PatternToken::Quoted("it's".to_string())]);
        assert_eq!(tokens("\"a'b\""), vec![PatternToken::Quoted("a'b".to_string())]);
    }

    #[test]
    fn percent_marks_a_single_field() {
        assert_eq!(tokens("%d"), vec![PatternToken::Single('d')]);
        assert_eq!(lex("%"), Err(FormatError::InvalidPercent));
        assert_eq!(lex("%%"), Err(FormatError::InvalidPercent));
    }

    #[test]
    fn malformed_patterns() {
        assert_eq!(lex("'abc"), Err(FormatError::UnterminatedQuote('\'')));
        assert_eq!(lex("\"abc"), Err(FormatError::UnterminatedQuote('"')));
        assert_eq!(lex("HH\\"), Err(FormatError::TrailingEscape));
        assert_eq!(lex("'ab\\"), Err(FormatError::TrailingEscape));
        assert_eq!(lex("ffffffff"), Err(FormatError::FractionTooLong(8)));
        assert!(lex("fffffff").is_ok());
    }

    #[test]
    fn repeat_helper() {
        assert_eq!(repeat_count("dddx", 'd'), 3);
        assert_eq!(repeat_count("x", 'd'), 0);
    }
}
