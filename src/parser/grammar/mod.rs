//! Grammar for the surface language
//!
//! - `literal`: identifiers, numbers, strings, operator symbols
//! - `expression`: lambdas, `let`, application and atoms
//!
//! ```text
//! program     := definition* expression?
//! definition  := binding ";"
//! ```

mod expression;
mod literal;

use crate::ast::{Binding, Program};
use crate::lexer::Token;

use super::combinators::{BoxedParser, Expected, token};
use super::state::{ParseResult, ParseState, Parser};

pub use expression::{application, atom, binding, expression, lambda, let_expression};
pub use literal::{ident, number, operator, string_literal};

/// Are we looking at `ident ident* =`?
fn at_definition_start(state: &ParseState) -> bool {
    let mut offset = 0;
    while let Some(Token::Ident(_)) = state.peek_ahead(offset) {
        offset += 1;
    }
    offset > 0 && matches!(state.peek_ahead(offset), Some(Token::Equals(_)))
}

/// definition := binding ";"
pub fn definition() -> BoxedParser<Binding> {
    BoxedParser::new(|state: &mut ParseState| {
        let binding = binding().parse(state)?;
        token(Expected::Semicolon).parse(state)?;
        Ok(binding)
    })
}

/// program := definition* expression?
pub fn program() -> BoxedParser<Program> {
    BoxedParser::new(|state: &mut ParseState| {
        let mut definitions = Vec::new();
        while at_definition_start(state) {
            definitions.push(definition().parse(state)?);
        }

        let main = if state.has_next() {
            Some(expression().parse(state)?)
        } else {
            None
        };

        Ok(Program { definitions, main })
    })
}

/// Parse a complete program from the token stream.
///
/// On failure the error that got furthest into the input is reported, since
/// that is almost always the one the programmer needs to see.
pub fn parse(state: &mut ParseState) -> ParseResult<Program> {
    match program().parse(state) {
        Ok(_) if state.has_next() => {
            let here = state.position();
            match (state.furthest_position(), state.furthest_error()) {
                (Some(at), Some(err)) if at >= here => Err(err.clone()),
                _ => Err(state.error_here("unexpected token")),
            }
        }
        Ok(program) => Ok(program),
        Err(err) => Err(state.furthest_error().cloned().unwrap_or(err)),
    }
}
