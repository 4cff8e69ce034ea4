//! Identifier grammar used for provider aliases and compact provider
//! references.
//!
//! An identifier starts with a letter or underscore and continues with
//! letters, digits, underscores or dashes.

use nom::{
    bytes::complete::{take_while, take_while1},
    combinator::{all_consuming, recognize},
    error::{context, VerboseError},
    sequence::pair,
    IResult,
};

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Recognizes the longest identifier at the start of `input`.
pub fn parse_identifier(input: &str) -> ParserResult<&str> {
    context(
        "identifier",
        recognize(pair(
            take_while1(is_identifier_start),
            take_while(is_identifier_continue),
        )),
    )(input)
}

/// Returns true when the whole of `name` is a single identifier.
pub fn valid_identifier(name: &str) -> bool {
    all_consuming(parse_identifier)(name).is_ok()
}
