//! The validating JSONPath tokenizer
//!
//! One tokenizer serves both dialects; only the quoting rules branch on the
//! [`Dialect`]. Validation happens in three stages, in order: the `$` root
//! check, a screen for operators this engine rejects outright (`*`, `..`,
//! `@`), and the token loop itself. Whatever the token loop cannot consume
//! becomes the offending substring in the error message.

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{map, opt, recognize};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
use crate::token::{Dialect, PathToken};

mod string;

type PResult<'a, O> = IResult<&'a str, O, nom::error::Error<&'a str>>;

/// Operators that are valid JSONPath but rejected here by design
///
/// Searched over the whole raw path before tokenization, so an unsupported
/// operator is reported even when earlier tokens are themselves invalid.
static UNSUPPORTED_OPERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\.|[*@]").expect("operator pattern compiles"));

/// Tokenize and validate a raw path string against `dialect`
///
/// On success the returned sequence always begins with [`PathToken::Root`].
/// A single trailing `.` after the last token is tolerated and does not
/// change the token sequence.
#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
pub(crate) fn parse_path_tokens(
    path: &str,
    dialect: Dialect,
) -> Result<Vec<PathToken>, ParseError> {
    let steps = path.strip_prefix('$').ok_or(ParseError::MissingRoot)?;
    if let Some(found) = UNSUPPORTED_OPERATOR.find(path) {
        let op = match found.as_str() {
            ".." => "..",
            "*" => "*",
            _ => "@",
        };
        return Err(ParseError::UnsupportedOperator(op));
    }
    let mut tokens = vec![PathToken::Root];
    let (rest, parsed) = many0(|input| parse_step(input, dialect))(steps)
        .map_err(|_| ParseError::InvalidToken(steps.to_string()))?;
    tokens.extend(parsed);
    if !rest.is_empty() && rest != "." {
        return Err(ParseError::InvalidToken(rest.to_string()));
    }
    Ok(tokens)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_step(input: &str, dialect: Dialect) -> PResult<PathToken> {
    alt((
        |i| parse_dot_step(i, dialect),
        |i| parse_bracket_step(i, dialect),
    ))(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_dot_step(input: &str, dialect: Dialect) -> PResult<PathToken> {
    match dialect {
        Dialect::Standard => {
            preceded(char('.'), alt((parse_bareword, parse_quoted('"'))))(input)
        }
        Dialect::Legacy => preceded(char('.'), parse_bareword)(input),
    }
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_bracket_step(input: &str, dialect: Dialect) -> PResult<PathToken> {
    match dialect {
        Dialect::Standard => delimited(
            pair(char('['), multispace0),
            parse_signed_integer,
            pair(multispace0, char(']')),
        )(input),
        Dialect::Legacy => delimited(
            pair(char('['), multispace0),
            alt((parse_quoted('\''), parse_bareword, parse_signed_integer)),
            pair(multispace0, char(']')),
        )(input),
    }
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_bareword(input: &str) -> PResult<PathToken> {
    map(
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        |text: &str| PathToken::from_text(text.to_string()),
    )(input)
}

#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", parent = None, ret, err))]
fn parse_signed_integer(input: &str) -> PResult<PathToken> {
    map(recognize(pair(opt(char('-')), digit1)), |text: &str| {
        PathToken::from_text(text.to_string())
    })(input)
}

fn parse_quoted(quote: char) -> impl Fn(&str) -> PResult<PathToken> {
    move |input: &str| {
        map(string::quoted_lexeme(quote), |raw| {
            PathToken::from_text(string::remove_backslash_before(raw, quote))
        })(input)
    }
}
