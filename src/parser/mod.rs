mod combinators;
mod grammar;
mod state;

pub use combinators::*;
pub use grammar::*;
pub use state::*;

use crate::ast::Program;
use crate::lexer::{Token, strip_comments};

/// Strip comments, lex and parse `source` in one go
pub fn parse_source(source: &str) -> Result<Program, crate::Error> {
    let source = strip_comments(source);
    let tokens = Token::lex(&source).map_err(|err| crate::Error::Lex(err.to_string()))?;
    let mut state = ParseState::new(tokens);
    Ok(parse(&mut state)?)
}
