use lachs::Span;

use super::Binding;

#[derive(Debug, Clone)]
pub enum Expression {
    Ident(Ident),
    Number(Number),
    String(StringLiteral),
    Operator(Operator),
    Lambda(Lambda),
    Application(Application),
    Let(Let),
}

impl Expression {
    pub fn position(&self) -> Span {
        match self {
            Expression::Ident(inner) => inner.position.clone(),
            Expression::Number(inner) => inner.position.clone(),
            Expression::String(inner) => inner.position.clone(),
            Expression::Operator(inner) => inner.position.clone(),
            Expression::Lambda(inner) => inner.position.clone(),
            Expression::Application(inner) => inner.position.clone(),
            Expression::Let(inner) => inner.position.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Number {
    pub value: f64,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub position: Span,
}

/// An infix operator symbol used in prefix position, e.g. `+ 1 2`
#[derive(Debug, Clone)]
pub struct Operator {
    pub symbol: &'static str,
    pub position: Span,
}

/// `\x y z . body`
#[derive(Debug, Clone)]
pub struct Lambda {
    pub params: Vec<Ident>,
    pub body: Box<Expression>,
    pub position: Span,
}

/// `func arg1 arg2 ...`, always with at least one argument
#[derive(Debug, Clone)]
pub struct Application {
    pub func: Box<Expression>,
    pub args: Vec<Expression>,
    pub position: Span,
}

/// `let a = ...; b = ... in body`, always recursive
#[derive(Debug, Clone)]
pub struct Let {
    pub bindings: Vec<Binding>,
    pub body: Box<Expression>,
    pub position: Span,
}
