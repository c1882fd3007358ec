//! Quoted path lexemes and their escape resolution
//!
//! Quoted tokens are handled in two phases, the way the rest of the path
//! grammar expects them: the lexer carries the raw interior of the quotes
//! (escape pairs intact) so error messages can show the original spelling,
//! and [`remove_backslash_before`] then resolves the escapes into the field
//! name used for object-key comparison.

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{anychar, char};
use nom::combinator::{recognize, value};
use nom::multi::many0_count;
use nom::sequence::{delimited, pair};

use super::PResult;

/// Lex a quoted token, returning the raw interior of the quotes
///
/// A backslash always consumes the character after it, so an escaped quote
/// does not terminate the lexeme.
pub(super) fn quoted_lexeme(quote: char) -> impl Fn(&str) -> PResult<&str> {
    move |input: &str| {
        delimited(
            char(quote),
            recognize(many0_count(alt((
                value((), take_while1(move |c| c != quote && c != '\\')),
                value((), pair(char('\\'), anychar)),
            )))),
            char(quote),
        )(input)
    }
}

/// Drop every backslash that directly precedes `quote`
///
/// This is the whole of escape resolution for quoted path tokens: the
/// token's own quote character loses its backslash, and every other
/// character (including backslashes in any other position) passes through
/// unchanged. The input is scanned once, one character at a time.
pub(super) fn remove_backslash_before(raw: &str, quote: char) -> String {
    let mut resolved = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&quote) {
            continue;
        }
        resolved.push(c);
    }
    resolved
}
