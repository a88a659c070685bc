//! Surface syntax tree, as written by the programmer
//!
//! Everything here still carries sugar: multi-parameter lambdas, function
//! definitions with parameters, multi-argument application and top-level
//! definitions. [`crate::desugar`] removes all of it.

use lachs::Span;

pub mod expression;

use expression::{Expression, Ident};

/// A whole source file: top-level definitions and an optional trailing
/// expression to evaluate
#[derive(Debug, Clone)]
pub struct Program {
    pub definitions: Vec<Binding>,
    pub main: Option<Expression>,
}

/// `name params* = value`, used both at the top level and inside `let`
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub value: Expression,
    pub position: Span,
}
