//! Printing for core expressions
//!
//! [`std::fmt::Display`] on [`crate::core::Expr`] gives the single-line form
//! used for results and errors. [`pretty`] lays `let` groups out over several
//! lines, which reads better for desugared programs.

pub mod core;

pub use self::core::pretty;
