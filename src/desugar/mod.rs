//! Desugaring - Transform surface AST to core expressions
//!
//! This module handles desugaring transformations:
//! - Multi-parameter lambdas → nested single-parameter lambdas
//! - `f x y = e` bindings → `f = \x . \y . e`
//! - Multi-argument application → nested single-argument applications
//! - `let` groups and top-level definitions → one recursive [`Letrec`] each
//! - Reserved names (`if`, `seq`, `undefined`, `True`, `Cons`, `head`, ...)
//!   → their dedicated core variants, unless a binding shadows them

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use lachs::Span;

use crate::ast::expression::{Application, Expression, Ident, Lambda, Let};
use crate::ast::{Binding, Program};
use crate::core::{Builtin, Expr};

/// Name evaluated when a program has definitions but no trailing expression
pub const ENTRY_POINT: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesugarError {
    /// The same name bound twice in one `let` group or at the top level
    DuplicateBinding { name: String, span: Span },
    /// Definitions without a trailing expression and without `main`
    MissingMain,
}

impl DesugarError {
    pub fn duplicate_binding(name: impl Into<String>, span: Span) -> Self {
        DesugarError::DuplicateBinding {
            name: name.into(),
            span,
        }
    }
}

impl fmt::Display for DesugarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DesugarError::DuplicateBinding { name, span } => {
                let msg = format!("'{name}' is bound more than once in the same group");
                if span.source.is_empty() {
                    write!(f, "Desugar error: {msg}")
                } else {
                    write!(f, "{}", span.to_string(&msg))
                }
            }
            DesugarError::MissingMain => write!(
                f,
                "Desugar error: program has no expression to evaluate and no '{ENTRY_POINT}'"
            ),
        }
    }
}

impl std::error::Error for DesugarError {}

/// Desugar a complete program into one closed core expression
pub fn desugar_program(program: Program) -> Result<Rc<Expr>, DesugarError> {
    Desugarer::default().program(program)
}

/// Desugar a single surface expression
pub fn desugar_expression(expression: Expression) -> Result<Rc<Expr>, DesugarError> {
    Desugarer::default().expression(expression)
}

/// Tracks which names are bound by enclosing lambdas and `let` groups, so a
/// binding called `head` or `if` is treated as an ordinary variable inside
/// its scope.
#[derive(Default)]
struct Desugarer {
    bound: Vec<String>,
}

impl Desugarer {
    fn program(&mut self, Program { definitions, main }: Program) -> Result<Rc<Expr>, DesugarError> {
        if definitions.is_empty() {
            return match main {
                Some(main) => self.expression(main),
                None => Err(DesugarError::MissingMain),
            };
        }

        let has_entry_point = definitions
            .iter()
            .any(|definition| definition.name.value == ENTRY_POINT);
        let body = match main {
            Some(main) => main,
            None if has_entry_point => Expression::Ident(Ident {
                value: ENTRY_POINT.to_string(),
                position: Span::default(),
            }),
            None => return Err(DesugarError::MissingMain),
        };

        self.group(definitions, body)
    }

    fn expression(&mut self, expression: Expression) -> Result<Rc<Expr>, DesugarError> {
        match expression {
            Expression::Ident(ident) => Ok(self.ident(ident)),
            Expression::Number(number) => Ok(Expr::number(number.value)),
            Expression::String(string) => Ok(Expr::string(string.value)),
            Expression::Operator(operator) => Ok(Builtin::from_symbol(operator.symbol)
                .map(Expr::builtin)
                .unwrap_or_else(|| Expr::var(operator.symbol))),
            Expression::Lambda(lambda) => self.lambda(lambda),
            Expression::Application(application) => self.application(application),
            Expression::Let(Let { bindings, body, .. }) => self.group(bindings, *body),
        }
    }

    fn ident(&self, Ident { value, .. }: Ident) -> Rc<Expr> {
        if self.bound.contains(&value) {
            return Expr::var(value);
        }
        match reserved(&value) {
            Some(expr) => expr,
            None => Expr::var(value),
        }
    }

    /// `\x y z . body` becomes `\x . \y . \z . body`
    fn lambda(&mut self, Lambda { params, body, .. }: Lambda) -> Result<Rc<Expr>, DesugarError> {
        let names = params
            .into_iter()
            .map(|param| param.value)
            .collect::<Vec<_>>();
        let body = self.scoped(&names, |this| this.expression(*body))?;
        Ok(Expr::lambdas(names, body))
    }

    /// `f a b c` becomes `((f a) b) c`
    fn application(
        &mut self,
        Application { func, args, .. }: Application,
    ) -> Result<Rc<Expr>, DesugarError> {
        let func = self.expression(*func)?;
        let args = args
            .into_iter()
            .map(|arg| self.expression(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expr::apply_all(func, args))
    }

    /// One recursive group: every name is visible in every value and in the body
    fn group(&mut self, bindings: Vec<Binding>, body: Expression) -> Result<Rc<Expr>, DesugarError> {
        let mut seen = HashSet::new();
        for binding in &bindings {
            if !seen.insert(binding.name.value.as_str()) {
                return Err(DesugarError::duplicate_binding(
                    binding.name.value.clone(),
                    binding.name.position.clone(),
                ));
            }
        }

        let names = bindings
            .iter()
            .map(|binding| binding.name.value.clone())
            .collect::<Vec<_>>();

        self.scoped(&names, |this| {
            let values = bindings
                .into_iter()
                .map(|binding| this.binding(binding))
                .collect::<Result<Vec<_>, _>>()?;
            let body = this.expression(body)?;
            Ok(Expr::letrec(values, body))
        })
    }

    /// `f x y = e` becomes `f = \x . \y . e`
    fn binding(
        &mut self,
        Binding {
            name,
            params,
            value,
            ..
        }: Binding,
    ) -> Result<(String, Rc<Expr>), DesugarError> {
        let params = params
            .into_iter()
            .map(|param| param.value)
            .collect::<Vec<_>>();
        let body = self.scoped(&params, |this| this.expression(value))?;
        Ok((name.value, Expr::lambdas(params, body)))
    }

    fn scoped<T>(
        &mut self,
        names: &[String],
        f: impl FnOnce(&mut Self) -> Result<T, DesugarError>,
    ) -> Result<T, DesugarError> {
        let depth = self.bound.len();
        self.bound.extend(names.iter().cloned());
        let result = f(self);
        self.bound.truncate(depth);
        result
    }
}

/// Core meaning of a reserved name that nothing shadows
fn reserved(name: &str) -> Option<Rc<Expr>> {
    let expr = match name {
        "if" => Rc::new(Expr::If),
        "seq" => Rc::new(Expr::Seq),
        "undefined" => Rc::new(Expr::Bottom),
        "True" => Expr::boolean(true),
        "False" => Expr::boolean(false),
        "Cons" => Expr::cons(),
        "Nil" => Expr::nil(),
        _ => return Builtin::from_symbol(name).map(Expr::builtin),
    };
    Some(expr)
}
