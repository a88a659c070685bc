//! Parser combinators over the token stream
//!
//! Every parser is a [`BoxedParser`]. Alternatives are joined with `|`,
//! results are mapped with `>>`. A single token is matched with [`token`],
//! which names what it wanted through [`Expected`] so failed alternatives at
//! the same position merge into one "expected a or b" message.

use std::fmt;
use std::ops::{BitOr, Shr};
use std::rc::Rc;

use crate::lexer::Token;

use super::state::{ParseError, ParseResult, ParseState, Parser};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>;

/// What the grammar was looking for when a parser failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Let,
    In,
    Equals,
    Semicolon,
    Backslash,
    Dot,
    LParen,
    RParen,
    Identifier,
    Number,
    String,
    Operator,
    /// Any atom: a name, literal, operator or parenthesized expression
    Expression,
    /// The name on the left of `=`
    BindingName,
}

impl Expected {
    /// Does `token` satisfy this expectation?
    ///
    /// `Expression` and `BindingName` are only ever attached to failures
    /// with [`BoxedParser::expecting`], so no single token matches them.
    pub fn matches(self, token: &Token) -> bool {
        match self {
            Expected::Let => matches!(token, Token::Let(_)),
            Expected::In => matches!(token, Token::In(_)),
            Expected::Equals => matches!(token, Token::Equals(_)),
            Expected::Semicolon => matches!(token, Token::Semicolon(_)),
            Expected::Backslash => matches!(token, Token::Backslash(_)),
            Expected::Dot => matches!(token, Token::Dot(_)),
            Expected::LParen => matches!(token, Token::LParen(_)),
            Expected::RParen => matches!(token, Token::RParen(_)),
            Expected::Identifier => matches!(token, Token::Ident(_)),
            Expected::Number => matches!(token, Token::Number(_)),
            Expected::String => matches!(token, Token::StringLiteral(_)),
            Expected::Operator => token.operator().is_some(),
            Expected::Expression | Expected::BindingName => false,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Expected::Let => "'let'",
            Expected::In => "'in'",
            Expected::Equals => "'='",
            Expected::Semicolon => "';'",
            Expected::Backslash => "'\\'",
            Expected::Dot => "'.'",
            Expected::LParen => "'('",
            Expected::RParen => "')'",
            Expected::Identifier => "identifier",
            Expected::Number => "number",
            Expected::String => "string",
            Expected::Operator => "operator",
            Expected::Expression => "expression",
            Expected::BindingName => "binding name",
        };
        f.write_str(text)
    }
}

/// Type-erased parser, cheap to clone
pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }

    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| self.parse(state).map(&f))
    }

    /// Try `self`; on failure rewind and try `other`.
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            self.parse(state).or_else(|_| {
                state.restore(start);
                other.parse(state)
            })
        })
    }

    /// Report a failure that consumed nothing as a missing `what`.
    ///
    /// A failure further in keeps its own, more precise, expectation.
    pub fn expecting(self, what: Expected) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            self.parse(state).map_err(|err| {
                if state.position() != start {
                    return err;
                }
                let err = err.expecting_only(what);
                state.record_error(err.clone());
                err
            })
        })
    }
}

/// `a | b` tries `a`, then `b`
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `p >> f` maps the result of `p` through `f`
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

/// Consume one token matching `expected`.
pub fn token(expected: Expected) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| {
        let err = match state.peek() {
            Some(tok) if expected.matches(tok) => match state.advance() {
                Some(tok) => return Ok(tok),
                None => ParseError::end_of_input(expected),
            },
            Some(tok) => ParseError::unexpected(tok, expected),
            None => ParseError::end_of_input(expected),
        };
        state.record_error(err.clone());
        Err(err)
    })
}

/// Zero or more `parser`, stopping at the first failure
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let start = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(start);
                    return Ok(results);
                }
            }
        }
    })
}

/// One or more `parser`
pub fn many1<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    let rest = many(parser.clone());
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = vec![parser.parse(state)?];
        results.extend(rest.parse(state)?);
        Ok(results)
    })
}
