//! # The WHNF Machine
//!
//! Reduction is a loop over a single-step function. Each step looks at the
//! head of the current application spine and either rewrites it, asks for a
//! closure to be reduced first, or reports that it is stuck.
//!
//! ```text
//! (head, spine) --whnf_step--> Rewrite(head', spine')         keep going
//!                          \-> Force { arg, spine, then }     push `then`, reduce arg
//!                          \-> Stuck(head, spine)             value, or resume a continuation
//! ```
//!
//! `if`, `seq` and builtins need the value of an argument before they can
//! continue. Instead of recursing into a nested reduction on the host stack,
//! the step returns [`Step::Force`] and the driver pushes a [`Continuation`]
//! onto a heap stack. When the argument gets stuck its reassembled value is
//! handed to the top continuation. Host stack usage is constant however deep
//! the program recurses.
//!
//! A forced argument starts from a copy of the caller's remaining spine, so a
//! condition or operand that is a function can take the pending arguments.
//! Copying is a reference count bump. When the argument gets stuck, whatever
//! is left of the copy is dropped; arguments it pushed itself stay wrapped
//! around its value.
//!
//! Entering a thunk that still holds an application or a `let` forces it
//! against an empty spine under a [`Continuation::Update`]. The value is
//! written back into the thunk before the caller continues with it, so every
//! argument, `let` binding and constructor field is evaluated at most once.

use std::rc::Rc;
use std::vec;

use tracing::{debug, trace};

use crate::core::{Apply, Builtin, Expr};

use super::config::{Convergence, ReducerConfig};
use super::error::EvalError;
use super::scope::{Closure, Env, Thunk};
use super::spine::Spine;

/// Outcome of a single machine step
#[derive(Debug)]
pub enum Step {
    /// A rule fired
    Rewrite(Closure, Spine),
    /// Reduce `arg` against `spine` to weak head normal form, then continue
    /// with `then`
    Force {
        arg: Closure,
        spine: Spine,
        then: Continuation,
    },
    /// No rule applies to this head
    Stuck(Closure, Spine),
}

/// Work suspended while an argument is being forced
#[derive(Debug)]
pub enum Continuation {
    /// Select a branch of `if` once the condition is known
    Condition(Spine),
    /// Discard the value and act as the identity
    Sequence(Spine),
    /// Collect builtin arguments one at a time, in source order
    Arguments {
        builtin: Builtin,
        forced: Vec<Rc<Expr>>,
        pending: vec::IntoIter<Thunk>,
        spine: Spine,
    },
    /// Remember the value of `thunk`, then apply it to `spine`
    Update { thunk: Thunk, spine: Spine },
}

/// Unwind nested applications: push every argument onto `spine` and return
/// the innermost function position.
pub fn redex(mut head: Closure, spine: &mut Spine) -> Closure {
    loop {
        let (func, arg) = match head.expr().as_ref() {
            Expr::Apply(Apply { func, arg }) => (Rc::clone(func), Rc::clone(arg)),
            _ => return head,
        };
        let env = head.env().clone();
        spine.push(argument(arg, &env));
        head = Closure::new(func, env);
    }
}

/// Suspend `arg` for the spine. A variable that is already bound, or a node
/// that already carries a thunk, is passed as that same thunk so its value is
/// shared with every other use.
fn argument(arg: Rc<Expr>, env: &Env) -> Thunk {
    match arg.as_ref() {
        Expr::Variable(name) => match env.lookup(name) {
            Some(bound) => bound,
            None => Thunk::new(Rc::clone(&arg), env.clone()),
        },
        Expr::Closed(thunk) => thunk.clone(),
        _ => Thunk::new(Rc::clone(&arg), env.clone()),
    }
}

/// Continue with the value of `thunk`, forcing and updating it first if it
/// has work left.
pub fn enter(thunk: Thunk, spine: Spine) -> Step {
    if thunk.needs_update() {
        return Step::Force {
            arg: thunk.closure().clone(),
            spine: Spine::new(),
            then: Continuation::Update { thunk, spine },
        };
    }
    Step::Rewrite(thunk.into_closure(), spine)
}

/// Apply at most one rewrite rule to `head`.
pub fn whnf_step(head: Closure, mut spine: Spine) -> Result<Step, EvalError> {
    let expr = Rc::clone(head.expr());

    match expr.as_ref() {
        Expr::Bottom => Err(EvalError::Divergence),
        Expr::Letrec(letrec) => {
            debug!(names = ?letrec.names, "binding letrec group");
            let env = head.env().bind_group(letrec);
            Ok(Step::Rewrite(Closure::new(Rc::clone(&letrec.body), env), spine))
        }
        Expr::Variable(name) => Ok(enter(head.env().resolve(name)?, spine)),
        Expr::Lambda(lambda) => match spine.pop() {
            Some(arg) => {
                let env = head.env().bind(lambda.param.as_str(), arg);
                Ok(Step::Rewrite(Closure::new(Rc::clone(&lambda.body), env), spine))
            }
            None => Ok(Step::Stuck(head, spine)),
        },
        Expr::If => match spine.pop() {
            Some(condition) => Ok(Step::Force {
                arg: condition.into_closure(),
                spine: spine.clone(),
                then: Continuation::Condition(spine),
            }),
            None => Ok(Step::Stuck(head, spine)),
        },
        Expr::Seq => match spine.pop() {
            Some(first) => Ok(Step::Force {
                arg: first.into_closure(),
                spine: spine.clone(),
                then: Continuation::Sequence(spine),
            }),
            None => Ok(Step::Stuck(head, spine)),
        },
        Expr::Builtin(builtin) => match spine.pop_many(builtin.arity()) {
            Some(args) => collect_arguments(*builtin, Vec::new(), args.into_iter(), spine),
            None => Ok(Step::Stuck(head, spine)),
        },
        Expr::Data(data) if !data.is_initialized() => match spine.pop_many(data.arity()) {
            Some(args) => {
                let fields = args.into_iter().map(Thunk::into_expr).collect();
                let instance = Rc::new(Expr::Data(data.saturate(fields)));
                Ok(Step::Rewrite(Closure::closed(instance), spine))
            }
            None => Ok(Step::Stuck(head, spine)),
        },
        Expr::Apply(_) => {
            let head = redex(head, &mut spine);
            Ok(Step::Rewrite(head, spine))
        }
        Expr::Closed(inner) => Ok(enter(inner.clone(), spine)),
        Expr::Data(_) | Expr::True | Expr::False | Expr::Number(_) | Expr::String(_) => {
            Ok(Step::Stuck(head, spine))
        }
    }
}

/// Hand the value of a forced argument to the continuation waiting on it.
pub fn resume(continuation: Continuation, value: Rc<Expr>) -> Result<Step, EvalError> {
    match continuation {
        Continuation::Condition(spine) => {
            let selector = match value.as_ref() {
                Expr::True => Expr::lambdas(["x", "y"], Expr::var("x")),
                Expr::False => Expr::lambdas(["x", "y"], Expr::var("y")),
                other => return Err(EvalError::type_mismatch("boolean condition", other)),
            };
            Ok(Step::Rewrite(Closure::closed(selector), spine))
        }
        Continuation::Sequence(spine) => {
            let identity = Expr::lambda("x", Expr::var("x"));
            Ok(Step::Rewrite(Closure::closed(identity), spine))
        }
        Continuation::Arguments {
            builtin,
            mut forced,
            pending,
            spine,
        } => {
            forced.push(value);
            collect_arguments(builtin, forced, pending, spine)
        }
        Continuation::Update { thunk, spine } => {
            trace!(value = %value, "updating thunk");
            thunk.update(Rc::clone(&value));
            Ok(Step::Rewrite(Closure::closed(value), spine))
        }
    }
}

fn collect_arguments(
    builtin: Builtin,
    forced: Vec<Rc<Expr>>,
    mut pending: vec::IntoIter<Thunk>,
    spine: Spine,
) -> Result<Step, EvalError> {
    match pending.next() {
        Some(arg) => Ok(Step::Force {
            arg: arg.into_closure(),
            spine: spine.clone(),
            then: Continuation::Arguments {
                builtin,
                forced,
                pending,
                spine,
            },
        }),
        None => {
            let result = builtin.apply(&forced)?;
            debug!(builtin = builtin.symbol(), result = %result, "builtin fired");
            Ok(Step::Rewrite(Closure::closed(result), spine))
        }
    }
}

/// A continuation waiting on the stack, with the spine floor of the
/// reduction it interrupted
struct Suspended {
    then: Continuation,
    floor: usize,
}

/// Drives [`whnf_step`] until the expression is in weak head normal form.
///
/// The step counter is kept across calls, so one reducer shares its budget
/// between everything it reduces.
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    config: ReducerConfig,
    steps: u64,
}

impl Reducer {
    pub fn new(config: ReducerConfig) -> Self {
        Self { config, steps: 0 }
    }

    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Reduce a closed expression to weak head normal form
    pub fn whnf(&mut self, expr: &Rc<Expr>) -> Result<Rc<Expr>, EvalError> {
        self.whnf_thunk(Thunk::closed(Rc::clone(expr)))
    }

    /// Force `thunk`, updating it (and every clone of it) with its value
    pub fn whnf_thunk(&mut self, thunk: Thunk) -> Result<Rc<Expr>, EvalError> {
        let started_at = self.steps;
        debug!(expr = %thunk.expr(), "reducing");
        let mut continuations: Vec<Suspended> = Vec::new();
        let mut previous: Option<Rc<Expr>> = None;
        // Arguments below the floor belong to the caller of a forced
        // reduction and are never part of its value.
        let mut floor = 0;
        let mut step = enter(thunk, Spine::new());

        loop {
            let (head, spine) = match step {
                Step::Rewrite(head, spine) => {
                    floor = floor.min(spine.len());
                    (head, spine)
                }
                Step::Force { arg, spine, then } => {
                    continuations.push(Suspended { then, floor });
                    floor = spine.len();
                    previous = None;
                    (arg, spine)
                }
                Step::Stuck(head, mut spine) => {
                    let value = spine.split_off(floor).rewrap(head.into_expr());
                    let Some(suspended) = continuations.pop() else {
                        debug!(steps = self.steps - started_at, "reached weak head normal form");
                        return Ok(value);
                    };
                    floor = suspended.floor;
                    previous = None;
                    step = resume(suspended.then, value)?;
                    continue;
                }
            };

            step = if self.converged(&head, &spine, &mut previous) {
                Step::Stuck(head, spine)
            } else {
                self.tick()?;
                trace!(
                    head = %head.expr(),
                    spine = spine.len(),
                    depth = continuations.len(),
                    "step"
                );
                whnf_step(head, spine)?
            };
        }
    }

    /// Structural fixed-point check, only active in [`Convergence::Structural`].
    ///
    /// Unwinding an application or unwrapping a closed expression reassembles
    /// to the same shape, so those heads are never compared.
    fn converged(&self, head: &Closure, spine: &Spine, previous: &mut Option<Rc<Expr>>) -> bool {
        if self.config.convergence != Convergence::Structural {
            return false;
        }
        if matches!(head.expr().as_ref(), Expr::Apply(_) | Expr::Closed(_)) {
            return false;
        }
        let shape = spine.clone().rewrap(head.clone().into_expr());
        let converged = previous.as_ref() == Some(&shape);
        *previous = Some(shape);
        converged
    }

    fn tick(&mut self) -> Result<(), EvalError> {
        self.steps += 1;
        match self.config.max_steps {
            Some(limit) if self.steps > limit => Err(EvalError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}
