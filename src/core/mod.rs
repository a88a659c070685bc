//! # Core Expressions - The Tree the Reducer Rewrites
//!
//! This module defines the **core expression model**: the closed set of
//! variants every program is desugared into before reduction.
//!
//! ## Pipeline Position
//!
//! ```text
//! Parser → Surface AST → Desugaring → [CORE EXPR] → WHNF Reducer → Printer
//! ```
//!
//! ## Variants
//!
//! ```text
//! pub enum Expr {
//!     Variable(String),     // x
//!     Lambda(Lambda),       // \x. body (single parameter only)
//!     Apply(Apply),         // f a (single argument only)
//!     Letrec(Letrec),       // let a = ..; b = .. in body (always recursive)
//!     If,                   // marker, arguments arrive on the spine
//!     Seq,                  // marker, arguments arrive on the spine
//!     Bottom,               // undefined
//!     True, False,
//!     Number(f64),
//!     String(String),
//!     Data(Data),           // Cons / Nil constructor instances
//!     Builtin(Builtin),     // + - * / == != < > head tail null concat
//!     Closed(Thunk),        // shared suspension, built by the reducer
//! }
//! ```
//!
//! `If`, `Seq`, `Builtin` and uninitialized `Data` carry no operands of their
//! own. They pick their arguments off the application spine when the reducer
//! reaches them, which is what lets a partially applied primitive be an
//! ordinary value.
//!
//! ## Sharing
//!
//! Children are held in [`Rc`]. Nothing in the reducer mutates a node, so a
//! subtree can be shared by every place that refers to it: a letrec value is
//! referenced from its group and from every lookup of its name.
//!
//! ## Equality
//!
//! `PartialEq` is structural: same variant, recursively equal fields.
//! Environments inside [`Expr::Closed`] compare by identity. This equality is
//! what the reducer's structural convergence mode and the test-suite use; the
//! language's own `==` is a [`Builtin`] that only compares numbers.

pub mod builtin;
pub mod data;

use std::rc::Rc;

pub use builtin::Builtin;
pub use data::{Constructor, Data};

use crate::interpreter::Thunk;

/// Core expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Variable(String),
    Lambda(Lambda),
    Apply(Apply),
    Letrec(Letrec),
    If,
    Seq,
    Bottom,
    True,
    False,
    Number(f64),
    String(String),
    Data(Data),
    Builtin(Builtin),
    /// An expression that must be read in a specific environment.
    ///
    /// Only the reducer creates these: pending spine arguments re-wrapped onto
    /// a result, lazy constructor fields, and lambdas escaping their scope.
    /// Every copy of the node refers to the same thunk, so forcing one
    /// forces them all.
    Closed(Thunk),
}

/// Lambda with exactly one parameter (multi-param lambdas are desugared)
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub param: String,
    pub body: Rc<Expr>,
}

/// Application of a function to exactly one argument
#[derive(Debug, Clone, PartialEq)]
pub struct Apply {
    pub func: Rc<Expr>,
    pub arg: Rc<Expr>,
}

/// A simultaneous group of mutually recursive bindings plus a body.
///
/// `names` and `values` are parallel sequences. Every name is visible in
/// every value and in the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Letrec {
    pub names: Vec<String>,
    pub values: Vec<Rc<Expr>>,
    pub body: Rc<Expr>,
}

impl Letrec {
    pub fn bindings(&self) -> impl Iterator<Item = (&String, &Rc<Expr>)> {
        self.names.iter().zip(self.values.iter())
    }
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Rc<Expr> {
        Rc::new(Expr::Variable(name.into()))
    }

    pub fn lambda(param: impl Into<String>, body: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Lambda(Lambda {
            param: param.into(),
            body,
        }))
    }

    /// Nested single-parameter lambdas, outermost parameter first
    pub fn lambdas<S: Into<String>>(params: impl IntoIterator<Item = S>, body: Rc<Expr>) -> Rc<Expr> {
        let params = params.into_iter().map(Into::into).collect::<Vec<String>>();
        params
            .into_iter()
            .rev()
            .fold(body, |body, param| Expr::lambda(param, body))
    }

    pub fn apply(func: Rc<Expr>, arg: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Apply(Apply { func, arg }))
    }

    /// `func a1 a2 ... an` as left-nested applications
    pub fn apply_all(func: Rc<Expr>, args: impl IntoIterator<Item = Rc<Expr>>) -> Rc<Expr> {
        args.into_iter().fold(func, Expr::apply)
    }

    pub fn letrec<S: Into<String>>(
        bindings: impl IntoIterator<Item = (S, Rc<Expr>)>,
        body: Rc<Expr>,
    ) -> Rc<Expr> {
        let (names, values) = bindings
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .unzip();
        Rc::new(Expr::Letrec(Letrec {
            names,
            values,
            body,
        }))
    }

    pub fn number(value: f64) -> Rc<Expr> {
        Rc::new(Expr::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Rc<Expr> {
        Rc::new(Expr::String(value.into()))
    }

    pub fn boolean(value: bool) -> Rc<Expr> {
        Rc::new(if value { Expr::True } else { Expr::False })
    }

    pub fn builtin(builtin: Builtin) -> Rc<Expr> {
        Rc::new(Expr::Builtin(builtin))
    }

    /// The uninitialized `Cons` constructor
    pub fn cons() -> Rc<Expr> {
        Rc::new(Expr::Data(Data::cons()))
    }

    /// The uninitialized `Nil` constructor
    pub fn nil() -> Rc<Expr> {
        Rc::new(Expr::Data(Data::nil()))
    }

    /// Is this the number `value`?
    pub fn is_number(&self, value: f64) -> bool {
        matches!(self, Expr::Number(n) if *n == value)
    }

    /// Human-readable kind of this expression, used in type mismatch errors
    pub fn describe(&self) -> String {
        match self {
            Expr::Variable(name) => format!("variable '{name}'"),
            Expr::Lambda(_) => "function".to_string(),
            Expr::Apply(apply) => {
                let mut head = apply.func.as_ref();
                while let Expr::Apply(inner) = head {
                    head = inner.func.as_ref();
                }
                format!("partial application of {}", head.describe())
            }
            Expr::Letrec(_) => "letrec".to_string(),
            Expr::If => "'if'".to_string(),
            Expr::Seq => "'seq'".to_string(),
            Expr::Bottom => "undefined".to_string(),
            Expr::True | Expr::False => "boolean".to_string(),
            Expr::Number(n) => format!("number {n}"),
            Expr::String(_) => "string".to_string(),
            Expr::Data(data) => format!("constructor {}", data.name()),
            Expr::Builtin(builtin) => format!("builtin '{}'", builtin.symbol()),
            Expr::Closed(thunk) => thunk.current().describe(),
        }
    }

    /// Does the meaning of this node depend on the environment it is read in?
    ///
    /// Scalars, markers, builtins and constructors mean the same thing
    /// everywhere; initialized constructors already close over their fields.
    pub fn needs_env(&self) -> bool {
        matches!(
            self,
            Expr::Variable(_) | Expr::Lambda(_) | Expr::Apply(_) | Expr::Letrec(_)
        )
    }
}
