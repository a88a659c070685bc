//! Strict primitives
//!
//! Every builtin has a fixed arity and is strict in all of its arguments: the
//! reducer forces each argument to weak head normal form before calling
//! [`Builtin::apply`]. The functions themselves never reduce anything. The
//! list accessors hand back the stored (unevaluated) field and leave forcing
//! it to the reducer.

use std::rc::Rc;

use crate::interpreter::EvalError;

use super::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,
    Head,
    Tail,
    Null,
    Concat,
}

impl Builtin {
    pub const ALL: [Builtin; 12] = [
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
        Builtin::Eq,
        Builtin::NotEq,
        Builtin::Lt,
        Builtin::Gt,
        Builtin::Head,
        Builtin::Tail,
        Builtin::Null,
        Builtin::Concat,
    ];

    /// Number of spine arguments needed before the builtin fires
    pub fn arity(self) -> usize {
        match self {
            Builtin::Head | Builtin::Tail | Builtin::Null => 1,
            _ => 2,
        }
    }

    /// How the builtin is spelled in source and printed
    pub fn symbol(self) -> &'static str {
        match self {
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Div => "/",
            Builtin::Eq => "==",
            Builtin::NotEq => "!=",
            Builtin::Lt => "<",
            Builtin::Gt => ">",
            Builtin::Head => "head",
            Builtin::Tail => "tail",
            Builtin::Null => "null",
            Builtin::Concat => "concat",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Builtin> {
        Builtin::ALL
            .into_iter()
            .find(|builtin| builtin.symbol() == symbol)
    }

    /// Run the primitive on arguments already in weak head normal form.
    pub fn apply(self, args: &[Rc<Expr>]) -> Result<Rc<Expr>, EvalError> {
        if args.len() != self.arity() {
            return Err(EvalError::ArityMismatch {
                builtin: self.symbol(),
                expected: self.arity(),
                found: args.len(),
            });
        }

        match self {
            Builtin::Add => arithmetic(args, |a, b| Ok(a + b)),
            Builtin::Sub => arithmetic(args, |a, b| Ok(a - b)),
            Builtin::Mul => arithmetic(args, |a, b| Ok(a * b)),
            Builtin::Div => arithmetic(args, |a, b| {
                if b == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(a / b)
                }
            }),
            Builtin::Eq => comparison(args, |a, b| a == b),
            Builtin::NotEq => comparison(args, |a, b| a != b),
            Builtin::Lt => comparison(args, |a, b| a < b),
            Builtin::Gt => comparison(args, |a, b| a > b),
            Builtin::Head => cons_field(&args[0], 0),
            Builtin::Tail => cons_field(&args[0], 1),
            Builtin::Null => match args[0].as_ref() {
                Expr::Data(data) if data.is_initialized() && data.name() == "Nil" => {
                    Ok(Expr::boolean(true))
                }
                Expr::Data(data) if data.is_initialized() && data.name() == "Cons" => {
                    Ok(Expr::boolean(false))
                }
                other => Err(EvalError::type_mismatch("list", other)),
            },
            Builtin::Concat => {
                let left = string(&args[0])?;
                let right = string(&args[1])?;
                Ok(Expr::string(format!("{left}{right}")))
            }
        }
    }
}

fn number(expr: &Expr) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        other => Err(EvalError::type_mismatch("number", other)),
    }
}

fn string(expr: &Expr) -> Result<&str, EvalError> {
    match expr {
        Expr::String(s) => Ok(s),
        other => Err(EvalError::type_mismatch("string", other)),
    }
}

fn arithmetic(
    args: &[Rc<Expr>],
    op: impl Fn(f64, f64) -> Result<f64, EvalError>,
) -> Result<Rc<Expr>, EvalError> {
    let left = number(&args[0])?;
    let right = number(&args[1])?;
    Ok(Expr::number(op(left, right)?))
}

fn comparison(args: &[Rc<Expr>], op: impl Fn(f64, f64) -> bool) -> Result<Rc<Expr>, EvalError> {
    let left = number(&args[0])?;
    let right = number(&args[1])?;
    Ok(Expr::boolean(op(left, right)))
}

fn cons_field(list: &Expr, index: usize) -> Result<Rc<Expr>, EvalError> {
    match list {
        Expr::Data(data) if data.name() == "Cons" => data
            .field(index)
            .cloned()
            .ok_or_else(|| EvalError::type_mismatch("non-empty list", list)),
        Expr::Data(data) if data.name() == "Nil" => {
            Err(EvalError::type_mismatch("non-empty list", list))
        }
        other => Err(EvalError::type_mismatch("list", other)),
    }
}
