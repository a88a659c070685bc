//! Literal parsers: identifiers, numbers, strings and operator symbols

use crate::ast::expression::{Ident, Number, Operator, StringLiteral};
use crate::lexer::Token;

use crate::parser::combinators::{BoxedParser, Expected, token};
use crate::parser::state::{ParseError, ParseState, Parser};

/// Parse an identifier
pub fn ident() -> BoxedParser<Ident> {
    let token = token(Expected::Identifier);
    BoxedParser::new(move |state: &mut ParseState| match token.parse(state)? {
        Token::Ident(id) => Ok(Ident {
            value: id.value,
            position: id.position,
        }),
        other => Err(ParseError::unexpected(&other, Expected::Identifier)),
    })
}

/// Parse a number literal
pub fn number() -> BoxedParser<Number> {
    let token = token(Expected::Number);
    BoxedParser::new(move |state: &mut ParseState| match token.parse(state)? {
        Token::Number(num) => {
            let value = num.value.parse::<f64>().map_err(|_| {
                ParseError::new("malformed number")
                    .found(num.value.clone())
                    .at(num.position.clone())
            })?;
            Ok(Number {
                value,
                position: num.position,
            })
        }
        other => Err(ParseError::unexpected(&other, Expected::Number)),
    })
}

/// Parse a string literal, resolving escapes
pub fn string_literal() -> BoxedParser<StringLiteral> {
    let token = token(Expected::String);
    BoxedParser::new(move |state: &mut ParseState| match token.parse(state)? {
        Token::StringLiteral(s) => {
            let quoted = s.value.as_str();
            let inner = quoted
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(quoted);
            Ok(StringLiteral {
                value: unescape(inner),
                position: s.position,
            })
        }
        other => Err(ParseError::unexpected(&other, Expected::String)),
    })
}

/// Parse an operator symbol
pub fn operator() -> BoxedParser<Operator> {
    let token = token(Expected::Operator);
    BoxedParser::new(move |state: &mut ParseState| {
        let tok = token.parse(state)?;
        match tok.operator() {
            Some(symbol) => Ok(Operator {
                symbol,
                position: tok.pos(),
            }),
            None => Err(ParseError::unexpected(&tok, Expected::Operator)),
        }
    })
}

fn unescape(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some(other) => value.push(other),
            None => value.push('\\'),
        }
    }
    value
}
