//! Access to flow statistics of children.
//!
//! Everything in this crate reads children through a [`FlowAdapter`], which
//! decouples the cost model from how children are stored. [`DefaultAdapter`]
//! reads the statistics straight off anything implementing [`FlowChild`],
//! while [`IndirectAdapter`] resolves positions into a backing slice so that
//! sorting can permute a small index buffer instead of the children.

use std::rc::Rc;
use std::sync::Arc;

/// Flow statistics of a sub-expression.
///
/// Values must be stable for a fixed child; they are read any number of
/// times while a node is optimized.
pub trait FlowChild {
    /// Probability in `[0, 1]` that the child matches an arbitrary document.
    fn estimate(&self) -> f64;
    /// Expected cost of one non-strict evaluation.
    fn cost(&self) -> f64;
    /// Expected cost of one strict evaluation.
    fn strict_cost(&self) -> f64;
}

impl<C: FlowChild + ?Sized> FlowChild for &C {
    fn estimate(&self) -> f64 {
        (**self).estimate()
    }

    fn cost(&self) -> f64 {
        (**self).cost()
    }

    fn strict_cost(&self) -> f64 {
        (**self).strict_cost()
    }
}

impl<C: FlowChild + ?Sized> FlowChild for Box<C> {
    fn estimate(&self) -> f64 {
        (**self).estimate()
    }

    fn cost(&self) -> f64 {
        (**self).cost()
    }

    fn strict_cost(&self) -> f64 {
        (**self).strict_cost()
    }
}

impl<C: FlowChild + ?Sized> FlowChild for Rc<C> {
    fn estimate(&self) -> f64 {
        (**self).estimate()
    }

    fn cost(&self) -> f64 {
        (**self).cost()
    }

    fn strict_cost(&self) -> f64 {
        (**self).strict_cost()
    }
}

impl<C: FlowChild + ?Sized> FlowChild for Arc<C> {
    fn estimate(&self) -> f64 {
        (**self).estimate()
    }

    fn cost(&self) -> f64 {
        (**self).cost()
    }

    fn strict_cost(&self) -> f64 {
        (**self).strict_cost()
    }
}

/// Reads flow statistics of a `T`.
pub trait FlowAdapter<T: ?Sized> {
    fn estimate(&self, child: &T) -> f64;
    fn cost(&self, child: &T) -> f64;
    fn strict_cost(&self, child: &T) -> f64;
}

impl<T: ?Sized, A: FlowAdapter<T> + ?Sized> FlowAdapter<T> for &A {
    fn estimate(&self, child: &T) -> f64 {
        (**self).estimate(child)
    }

    fn cost(&self, child: &T) -> f64 {
        (**self).cost(child)
    }

    fn strict_cost(&self, child: &T) -> f64 {
        (**self).strict_cost(child)
    }
}

/// Forwards to the child's own [`FlowChild`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAdapter;

impl<T: FlowChild + ?Sized> FlowAdapter<T> for DefaultAdapter {
    fn estimate(&self, child: &T) -> f64 {
        child.estimate()
    }

    fn cost(&self, child: &T) -> f64 {
        child.cost()
    }

    fn strict_cost(&self, child: &T) -> f64 {
        child.strict_cost()
    }
}

/// Adapts positions into `data` using an inner adapter.
///
/// Positions are `u32` to match the index buffers produced by
/// [`make_index`](crate::make_index).
pub struct IndirectAdapter<'a, A, T> {
    adapter: A,
    data: &'a [T],
}

impl<'a, A, T> IndirectAdapter<'a, A, T> {
    pub fn new(adapter: A, data: &'a [T]) -> Self {
        Self { adapter, data }
    }

    pub fn data(&self) -> &'a [T] {
        self.data
    }
}

impl<'a, A: Clone, T> Clone for IndirectAdapter<'a, A, T> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            data: self.data,
        }
    }
}

impl<'a, A: Copy, T> Copy for IndirectAdapter<'a, A, T> {}

impl<'a, A: FlowAdapter<T>, T> FlowAdapter<u32> for IndirectAdapter<'a, A, T> {
    fn estimate(&self, child: &u32) -> f64 {
        self.adapter.estimate(&self.data[*child as usize])
    }

    fn cost(&self, child: &u32) -> f64 {
        self.adapter.cost(&self.data[*child as usize])
    }

    fn strict_cost(&self, child: &u32) -> f64 {
        self.adapter.strict_cost(&self.data[*child as usize])
    }
}
