use std::fmt;

use lachs::Span;

use crate::lexer::Token;

use super::combinators::Expected;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<String>,
    pub found: Option<String>,
    pub span: Option<Span>,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            expected: vec![],
            found: None,
            span: None,
        }
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected.push(expected.into());
        self
    }

    pub fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// `token` stands where `expected` should be
    pub fn unexpected(token: &Token, expected: Expected) -> Self {
        Self::new("unexpected token")
            .expected(expected.to_string())
            .found(token.describe())
            .at(token.pos())
    }

    /// Input ran out where `expected` should be
    pub fn end_of_input(expected: Expected) -> Self {
        Self::new("unexpected end of input").expected(expected.to_string())
    }

    /// Replace every expectation with `what`
    pub fn expecting_only(mut self, what: Expected) -> Self {
        self.expected = vec![what.to_string()];
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = self.message.clone();
        if !self.expected.is_empty() {
            msg.push_str(&format!(", expected {}", self.expected.join(" or ")));
        }
        if let Some(found) = &self.found {
            msg.push_str(&format!(", found {found}"));
        }

        match &self.span {
            Some(span) if !span.source.is_empty() => write!(f, "{}", span.to_string(&msg)),
            _ => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
    /// Error that got furthest into the input, reported when everything fails
    furthest: Option<(usize, ParseError)>,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            furthest: None,
        }
    }

    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn peek_ahead(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.index + offset)
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Remember `err` if no earlier failure got further into the input.
    ///
    /// Alternatives that fail at the same token merge their expectations.
    pub fn record_error(&mut self, err: ParseError) {
        match &mut self.furthest {
            Some((index, furthest)) if *index == self.index => {
                for expected in err.expected {
                    if !furthest.expected.contains(&expected) {
                        furthest.expected.push(expected);
                    }
                }
            }
            Some((index, _)) if *index > self.index => {}
            _ => self.furthest = Some((self.index, err)),
        }
    }

    pub fn furthest_error(&self) -> Option<&ParseError> {
        self.furthest.as_ref().map(|(_, err)| err)
    }

    /// Token index at which the furthest error was recorded
    pub fn furthest_position(&self) -> Option<usize> {
        self.furthest.as_ref().map(|(index, _)| *index)
    }

    /// Error for the current token, or for running out of input
    pub fn error_here(&self, msg: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::new(msg).found(token.describe()).at(token.pos()),
            None => ParseError::new("unexpected end of input"),
        }
    }
}

pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

// Allow closures to be parsers
impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
