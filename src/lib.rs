//! # Bagl - A Lazy Graph-Reduction Engine
//!
//! Bagl evaluates a small applied lambda calculus to weak head normal form.
//! Programs are lexed, parsed, desugared into a handful of core expression
//! forms and then reduced lazily: nothing is evaluated until something needs
//! its value.
//!
//! ## Architecture Overview
//!
//! 1. **Lexer** (`lexer`) - Tokenizes source code using the `lachs` library
//! 2. **Parser** (`parser`) - Builds a surface AST with combinator-based recursive descent
//! 3. **Desugaring** (`desugar`) - Lowers the surface AST to core expressions
//! 4. **Reducer** (`interpreter`) - Rewrites core expressions to weak head normal form
//! 5. **Printer** (`fmt`) - Renders results and desugared programs
//!
//! ## Pipeline Flow
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → Token Stream
//!     ↓
//! [Parser] → Surface AST (ast::Program)
//!     ↓
//! [Desugaring] → Core Expression (Rc<core::Expr>)
//!     ↓
//! [Reducer] → Value in weak head normal form (Rc<core::Expr>)
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Spines instead of argument lists
//! Applications are unwound into a head and a stack of pending arguments (the
//! spine). Lambdas take one argument off the spine at a time; builtins and
//! data constructors wait until the spine holds their full arity. A
//! primitive with too few arguments is simply a value.
//!
//! ### Environments instead of substitution
//! Beta reduction binds the argument in a new frame of a persistent,
//! reference-counted environment instead of copying the lambda body. Every
//! expression the reducer handles travels with the environment it must be
//! read in (a [`interpreter::Closure`]), so variable capture cannot happen.
//!
//! ### Laziness
//! Arguments, `let` values and constructor fields are stored unevaluated as
//! [`interpreter::Thunk`]s. Only `if` conditions, `seq`'s first argument and
//! builtin arguments are forced. Evaluation is call-by-need: a thunk is
//! reduced the first time its value is needed and every later use reads the
//! remembered value.
//!
//! ### No host recursion
//! The reducer is a loop with an explicit continuation stack. Deeply
//! recursive programs use heap, not native stack.
//!
//! ## Module Structure
//!
//! - [`ast`] - Surface syntax tree
//! - [`core`] - Core expressions, builtins and data constructors
//! - [`desugar`] - Surface to core lowering
//! - [`interpreter`] - The WHNF reducer, environments and spines
//! - [`lexer`] - Tokenization using lachs
//! - [`parser`] - Parsing using combinator-based grammar
//! - [`fmt`] - Printing of core expressions
//!
//! ## Example Program
//!
//! ```text
//! from n = Cons n (from (+ n 1));
//! head (tail (tail (from 0)))
//! ```
//!
//! `from 0` is an infinite list, but only the cells `head` and `tail` touch
//! are ever built. The program prints `2`.
//!
//! ## Getting Started
//!
//! 1. Compile source code to a core expression with [`compile()`]
//! 2. Reduce it with [`interpreter::Reducer::whnf()`] or [`interpreter::Reducer::normalize()`]
//! 3. Print the result with `Display` or [`fmt::pretty()`]
//!
//! [`evaluate()`] does all of it in one call.

pub mod ast;
pub mod core;
pub mod desugar;
pub mod fmt;
pub mod interpreter;
pub mod lexer;
pub mod parser;

use std::rc::Rc;

use thiserror::Error;

use crate::core::Expr;
use crate::desugar::DesugarError;
use crate::interpreter::{EvalError, Reducer, ReducerConfig};
use crate::parser::ParseError;

/// Any failure between source text and result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("lexing failed: {0}")]
    Lex(String),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Desugar(#[from] DesugarError),
    #[error("evaluation failed: {0}")]
    Eval(#[from] EvalError),
}

/// Lex, parse and desugar `source` into one closed core expression
pub fn compile(source: &str) -> Result<Rc<Expr>, Error> {
    let program = parser::parse_source(source)?;
    Ok(desugar::desugar_program(program)?)
}

/// Compile `source` and reduce it to weak head normal form
pub fn evaluate(source: &str, config: ReducerConfig) -> Result<Rc<Expr>, Error> {
    let expr = compile(source)?;
    Ok(Reducer::new(config).whnf(&expr)?)
}
