//! Lazy data constructors
//!
//! A [`Data`] node starts out uninitialized: it is just a constructor tag
//! waiting on the spine for `arity` arguments. Saturation stores those
//! arguments unevaluated as its fields. The node in the program tree is never
//! changed; [`Data::saturate`] returns the initialized instance, so one `Cons`
//! in the body of a recursive function can build every cell of a list.

use std::rc::Rc;

use super::Expr;

/// Declared shape of a constructor: its tag, its type and its arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constructor {
    pub name: String,
    pub type_name: String,
    pub arity: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    constructor: Rc<Constructor>,
    fields: Option<Vec<Rc<Expr>>>,
}

impl Data {
    pub fn new(constructor: Constructor) -> Self {
        Self {
            constructor: Rc::new(constructor),
            fields: None,
        }
    }

    /// `Cons head tail`, of type `List`
    pub fn cons() -> Self {
        Self::new(Constructor {
            name: "Cons".to_string(),
            type_name: "List".to_string(),
            arity: 2,
        })
    }

    /// `Nil`, of type `List`
    pub fn nil() -> Self {
        Self::new(Constructor {
            name: "Nil".to_string(),
            type_name: "List".to_string(),
            arity: 0,
        })
    }

    pub fn constructor(&self) -> &Constructor {
        &self.constructor
    }

    pub fn name(&self) -> &str {
        &self.constructor.name
    }

    pub fn type_name(&self) -> &str {
        &self.constructor.type_name
    }

    pub fn arity(&self) -> usize {
        self.constructor.arity
    }

    pub fn is_initialized(&self) -> bool {
        self.fields.is_some()
    }

    /// Stored fields, `None` while uninitialized
    pub fn fields(&self) -> Option<&[Rc<Expr>]> {
        self.fields.as_deref()
    }

    pub fn field(&self, index: usize) -> Option<&Rc<Expr>> {
        self.fields.as_ref().and_then(|fields| fields.get(index))
    }

    /// The initialized instance holding `fields`.
    ///
    /// An already initialized instance ignores further saturation and is
    /// returned unchanged.
    pub fn saturate(&self, fields: Vec<Rc<Expr>>) -> Data {
        if self.is_initialized() {
            return self.clone();
        }
        Data {
            constructor: Rc::clone(&self.constructor),
            fields: Some(fields),
        }
    }

    /// Same constructor, fields replaced. Used when deep-forcing for output.
    pub(crate) fn with_fields(&self, fields: Vec<Rc<Expr>>) -> Data {
        Data {
            constructor: Rc::clone(&self.constructor),
            fields: Some(fields),
        }
    }
}
