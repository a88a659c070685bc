mod config;
mod error;
mod normalize;
mod scope;
mod spine;
mod whnf;

pub use config::{Convergence, ReducerConfig};
pub use error::EvalError;
pub use scope::{Closure, Env, Thunk};
pub use spine::Spine;
pub use whnf::{Continuation, Reducer, Step, enter, redex, resume, whnf_step};

use std::rc::Rc;

use crate::core::Expr;

/// Reduce a closed expression to weak head normal form with the default
/// configuration
pub fn whnf(expr: &Rc<Expr>) -> Result<Rc<Expr>, EvalError> {
    Reducer::default().whnf(expr)
}

/// Reduce a closed expression and all of its data fields with the default
/// configuration
pub fn normalize(expr: &Rc<Expr>) -> Result<Rc<Expr>, EvalError> {
    Reducer::default().normalize(expr)
}
