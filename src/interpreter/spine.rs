use std::rc::Rc;

use im::Vector;

use crate::core::Expr;

use super::scope::Thunk;

/// Pending arguments collected while unwinding nested applications.
///
/// The back of the vector is the argument nearest the head, so `f a b c`
/// unwinds to head `f` with spine `[c, b, a]`. Backed by a persistent
/// vector: cloning shares structure instead of copying.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spine(Vector<Thunk>);

impl Spine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, arg: Thunk) {
        self.0.push_back(arg);
    }

    /// Argument nearest the head
    pub fn pop(&mut self) -> Option<Thunk> {
        self.0.pop_back()
    }

    /// Pop `count` arguments at once, returned in source order.
    ///
    /// Leaves the spine untouched when it holds fewer than `count`.
    pub fn pop_many(&mut self, count: usize) -> Option<Vec<Thunk>> {
        if self.0.len() < count {
            return None;
        }
        let rest = self.0.len() - count;
        let mut popped = self.0.split_off(rest).into_iter().collect::<Vec<_>>();
        popped.reverse();
        Some(popped)
    }

    /// Split off every argument above the first `at`, keeping their order.
    ///
    /// `self` keeps the `at` arguments furthest from the head.
    pub fn split_off(&mut self, at: usize) -> Spine {
        Spine(self.0.split_off(at.min(self.0.len())))
    }

    /// Wrap every pending argument back around `head`, nearest first, and
    /// empty the spine.
    pub fn rewrap(&mut self, head: Rc<Expr>) -> Rc<Expr> {
        let mut expr = head;
        while let Some(arg) = self.0.pop_back() {
            expr = Expr::apply(expr, arg.into_expr());
        }
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(n: f64) -> Thunk {
        Thunk::closed(Expr::number(n))
    }

    fn spine_of(args: &[f64]) -> Spine {
        // source order in, nearest-first on the back
        let mut spine = Spine::new();
        for n in args.iter().rev() {
            spine.push(arg(*n));
        }
        spine
    }

    #[test]
    fn pop_many_returns_source_order() {
        let mut spine = spine_of(&[1.0, 2.0, 3.0]);

        let popped = spine.pop_many(2).expect("two arguments available");
        let values = popped
            .iter()
            .map(|thunk| thunk.expr().as_ref().clone())
            .collect::<Vec<_>>();

        assert_eq!(values, vec![Expr::Number(1.0), Expr::Number(2.0)]);
        assert_eq!(spine.len(), 1);
        assert_eq!(spine.pop(), Some(arg(3.0)));
    }

    #[test]
    fn pop_many_leaves_short_spine_alone() {
        let mut spine = spine_of(&[1.0]);
        assert!(spine.pop_many(2).is_none());
        assert_eq!(spine.len(), 1);
    }

    #[test]
    fn pop_many_of_zero_is_empty() {
        let mut spine = Spine::new();
        assert_eq!(spine.pop_many(0), Some(vec![]));
    }

    #[test]
    fn rewrap_restores_application_order() {
        let mut spine = spine_of(&[1.0, 2.0]);
        let expr = spine.rewrap(Expr::var("f"));

        assert_eq!(
            expr,
            Expr::apply_all(Expr::var("f"), [Expr::number(1.0), Expr::number(2.0)])
        );
        assert!(spine.is_empty());
    }

    #[test]
    fn split_off_keeps_the_arguments_nearest_the_head() {
        let mut spine = spine_of(&[1.0, 2.0, 3.0]);
        let mut near = spine.split_off(1);

        assert_eq!(spine.len(), 1);
        assert_eq!(
            near.rewrap(Expr::var("f")),
            Expr::apply_all(Expr::var("f"), [Expr::number(1.0), Expr::number(2.0)])
        );
        assert!(spine.split_off(5).is_empty());
    }

    #[test]
    fn clones_are_independent() {
        let mut original = spine_of(&[1.0, 2.0]);
        let copy = original.clone();
        original.pop();

        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }
}
