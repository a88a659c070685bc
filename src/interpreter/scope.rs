use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::core::{Expr, Letrec};

use super::error::EvalError;

/// Slot holding the value of a thunk once it has been forced
type Memo = Rc<RefCell<Option<Rc<Expr>>>>;

/// One letrec binding. The value is read in the environment holding the
/// group, and its memo is shared by every lookup through that frame.
struct GroupSlot {
    expr: Rc<Expr>,
    memo: Memo,
}

/// Names bound by one letrec group
type GroupFrame = HashMap<String, GroupSlot>;

enum Bindings {
    /// A letrec group. Values are unevaluated and see the group itself.
    Group(GroupFrame),
    /// A lambda parameter bound to its argument
    Argument { name: String, value: Thunk },
}

struct Frame {
    bindings: Bindings,
    parent: Env,
}

/// Persistent chain of binding frames, innermost first.
///
/// Extending an environment never changes it: [`Env::bind`] and
/// [`Env::bind_group`] return a new chain that shares every existing frame.
/// Cloning is a reference count bump.
#[derive(Clone, Default)]
pub struct Env(Option<Rc<Frame>>);

impl Env {
    pub fn empty() -> Self {
        Env(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Number of frames in the chain
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(frame) = &current.0 {
            depth += 1;
            current = &frame.parent;
        }
        depth
    }

    /// Push one frame for a whole letrec group.
    ///
    /// Lookups that land in this frame return the bound value paired with the
    /// extended environment, so values can refer to themselves and to each
    /// other.
    pub fn bind_group(&self, letrec: &Letrec) -> Env {
        let frame = letrec
            .bindings()
            .map(|(name, value)| {
                let slot = GroupSlot {
                    expr: Rc::clone(value),
                    memo: Memo::default(),
                };
                (name.clone(), slot)
            })
            .collect::<GroupFrame>();
        self.push(Bindings::Group(frame))
    }

    /// Push one frame binding a lambda parameter
    pub fn bind(&self, name: impl Into<String>, value: Thunk) -> Env {
        self.push(Bindings::Argument {
            name: name.into(),
            value,
        })
    }

    fn push(&self, bindings: Bindings) -> Env {
        Env(Some(Rc::new(Frame {
            bindings,
            parent: self.clone(),
        })))
    }

    /// Resolve a name by searching from the innermost frame outward
    pub fn lookup(&self, name: &str) -> Option<Thunk> {
        let mut current = self;
        while let Some(frame) = &current.0 {
            match &frame.bindings {
                Bindings::Group(group) => {
                    if let Some(slot) = group.get(name) {
                        let closure = Closure::new(Rc::clone(&slot.expr), current.clone());
                        return Some(Thunk::shared(closure, Rc::clone(&slot.memo)));
                    }
                }
                Bindings::Argument { name: bound, value } if bound == name => {
                    return Some(value.clone());
                }
                Bindings::Argument { .. } => {}
            }
            current = &frame.parent;
        }
        None
    }

    pub fn resolve(&self, name: &str) -> Result<Thunk, EvalError> {
        self.lookup(name)
            .ok_or_else(|| EvalError::unbound_variable(name))
    }

    /// Every bound name, innermost frame first
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = self;
        while let Some(frame) = &current.0 {
            match &frame.bindings {
                Bindings::Group(group) => {
                    let mut group_names = group.keys().map(String::as_str).collect::<Vec<_>>();
                    group_names.sort_unstable();
                    names.extend(group_names);
                }
                Bindings::Argument { name, .. } => names.push(name.as_str()),
            }
            current = &frame.parent;
        }
        names
    }
}

impl PartialEq for Env {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// Chains grow with every lambda application, so release them iteratively.
impl Drop for Env {
    fn drop(&mut self) {
        let mut pending = self.0.take().into_iter().collect::<Vec<_>>();
        while let Some(frame) = pending.pop() {
            if let Ok(mut frame) = Rc::try_unwrap(frame) {
                pending.extend(frame.parent.0.take());
                if let Bindings::Argument { value, .. } = &mut frame.bindings {
                    pending.extend(value.closure.env.0.take());
                }
            }
        }
    }
}

/// An expression together with the environment it is read in
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    expr: Rc<Expr>,
    env: Env,
}

impl Closure {
    pub fn new(expr: Rc<Expr>, env: Env) -> Self {
        Self { expr, env }
    }

    /// A closure for an expression with no free variables
    pub fn closed(expr: Rc<Expr>) -> Self {
        Self::new(expr, Env::empty())
    }

    pub fn expr(&self) -> &Rc<Expr> {
        &self.expr
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn into_parts(self) -> (Rc<Expr>, Env) {
        (self.expr, self.env)
    }

    /// Turn the closure back into a plain expression.
    ///
    /// The environment is kept (as [`Expr::Closed`]) only when the expression
    /// could still refer to it.
    pub fn into_expr(self) -> Rc<Expr> {
        if self.env.is_empty() || !self.expr.needs_env() {
            self.expr
        } else {
            Rc::new(Expr::Closed(Thunk::from(self)))
        }
    }
}

/// A suspended computation that is evaluated at most once.
///
/// Clones share the memo: once any of them has been forced to weak head
/// normal form, every clone answers with that value. Lambda arguments,
/// letrec bindings and constructor fields are all thunks, so a value is
/// computed once however often it is used.
#[derive(Clone)]
pub struct Thunk {
    closure: Closure,
    memo: Memo,
}

impl Thunk {
    pub fn new(expr: Rc<Expr>, env: Env) -> Self {
        Self::from(Closure::new(expr, env))
    }

    /// A thunk for an expression with no free variables
    pub fn closed(expr: Rc<Expr>) -> Self {
        Self::from(Closure::closed(expr))
    }

    fn shared(closure: Closure, memo: Memo) -> Self {
        Self { closure, memo }
    }

    pub fn closure(&self) -> &Closure {
        &self.closure
    }

    pub fn expr(&self) -> &Rc<Expr> {
        &self.closure.expr
    }

    pub fn env(&self) -> &Env {
        &self.closure.env
    }

    /// The value this thunk was forced to, if it has been
    pub fn value(&self) -> Option<Rc<Expr>> {
        self.memo.borrow().clone()
    }

    pub fn is_forced(&self) -> bool {
        self.memo.borrow().is_some()
    }

    /// Record the weak head normal form of this thunk for every clone
    pub fn update(&self, value: Rc<Expr>) {
        *self.memo.borrow_mut() = Some(value);
    }

    /// Would forcing this thunk do work worth remembering?
    ///
    /// Everything but applications and letrecs is already a value or an
    /// indirection to another thunk.
    pub fn needs_update(&self) -> bool {
        !self.is_forced() && matches!(self.expr().as_ref(), Expr::Apply(_) | Expr::Letrec(_))
    }

    /// The forced value, or the suspended expression if not forced yet
    pub fn current(&self) -> Rc<Expr> {
        self.value().unwrap_or_else(|| Rc::clone(self.expr()))
    }

    /// What to reduce to get this thunk's value
    pub fn into_closure(self) -> Closure {
        match self.value() {
            Some(value) => Closure::closed(value),
            None => self.closure,
        }
    }

    /// Turn the thunk back into a plain expression, keeping it shared while
    /// it still has work to do or free variables to resolve
    pub fn into_expr(self) -> Rc<Expr> {
        if let Some(value) = self.value() {
            return value;
        }
        let keeps_env = !self.env().is_empty() && self.expr().needs_env();
        if keeps_env || self.needs_update() {
            Rc::new(Expr::Closed(self))
        } else {
            Rc::clone(self.expr())
        }
    }
}

impl From<Closure> for Thunk {
    fn from(closure: Closure) -> Self {
        Self::shared(closure, Memo::default())
    }
}

// Thunks with the same expression and environment denote the same value,
// whether or not either has been forced.
impl PartialEq for Thunk {
    fn eq(&self, other: &Self) -> bool {
        self.closure == other.closure
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thunk")
            .field("expr", self.expr())
            .field("env", self.env())
            .field("forced", &self.is_forced())
            .finish()
    }
}
