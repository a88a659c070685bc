//! # Evaluation Errors
//!
//! Every error here is fatal to the reduction that raised it: there is no
//! retry and no partial result. The error propagates straight to the caller
//! of [`crate::interpreter::Reducer::whnf`].
//!
//! An under-saturated builtin or constructor is *not* an error. It is a
//! stuck but valid value (a partially applied function).

use thiserror::Error;

use crate::core::Expr;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable that no enclosing frame binds
    #[error("unbound variable: {name}")]
    UnboundVariable { name: String },

    /// Wrong kind of value for an `if` condition, a builtin or a list accessor
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// `undefined` was evaluated
    #[error("evaluated undefined: the program diverges")]
    Divergence,

    #[error("division by zero")]
    DivisionByZero,

    /// A builtin called with the wrong number of arguments.
    ///
    /// The reducer only calls builtins once saturated, so this only shows up
    /// when [`crate::core::Builtin::apply`] is used directly.
    #[error("builtin '{builtin}' expects {expected} arguments, found {found}")]
    ArityMismatch {
        builtin: &'static str,
        expected: usize,
        found: usize,
    },

    /// The configured step budget ran out
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },
}

impl EvalError {
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        EvalError::UnboundVariable { name: name.into() }
    }

    pub fn type_mismatch(expected: impl Into<String>, found: &Expr) -> Self {
        EvalError::TypeMismatch {
            expected: expected.into(),
            found: found.describe(),
        }
    }
}
