//! Orderings that minimize the expected cost of evaluating a node's children.
//!
//! Each policy ranks a child by how much work it saves the children after it
//! per unit of its own cost, derived from an exchange argument: swapping an
//! adjacent pair that the policy considers out of order never increases total
//! expected cost. Ranks are plain `f64` keys compared with
//! [`f64::total_cmp`], so every sort sees a total order.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::FlowAdapter;

/// Buffer of child positions used when children are sorted indirectly.
pub type ChildIndex = SmallVec<[u32; 16]>;

/// Precedence policy for one node kind and strictness.
pub trait FlowOrder {
    /// Sort key of `child`; higher ranks are evaluated first.
    fn rank<T: ?Sized, A: FlowAdapter<T>>(adapter: &A, child: &T) -> f64;

    /// Returns true if `a` should be evaluated before `b`.
    fn less<T: ?Sized, A: FlowAdapter<T>>(adapter: &A, a: &T, b: &T) -> bool {
        compare::<Self, T, A>(adapter, a, b) == Ordering::Less
    }
}

/// Cheap children that are likely to reject go first in an AND.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinAndCost;

impl FlowOrder for MinAndCost {
    fn rank<T: ?Sized, A: FlowAdapter<T>>(adapter: &A, child: &T) -> f64 {
        ratio(1.0 - adapter.estimate(child), adapter.cost(child))
    }
}

/// Cheap children that are likely to match go first in an OR.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinOrCost;

impl FlowOrder for MinOrCost {
    fn rank<T: ?Sized, A: FlowAdapter<T>>(adapter: &A, child: &T) -> f64 {
        ratio(adapter.estimate(child), adapter.cost(child))
    }
}

/// Like [`MinOrCost`], weighing strict cost instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinOrStrictCost;

impl FlowOrder for MinOrStrictCost {
    fn rank<T: ?Sized, A: FlowAdapter<T>>(adapter: &A, child: &T) -> f64 {
        ratio(adapter.estimate(child), adapter.strict_cost(child))
    }
}

/// `gain / cost`, with free children that gain anything ranked first and
/// free children that gain nothing ranked like any other zero.
fn ratio(gain: f64, cost: f64) -> f64 {
    if cost > 0.0 {
        // `+ 0.0` folds -0.0 into 0.0 so total_cmp sees them as equal.
        gain / cost + 0.0
    } else if gain > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Identity permutation `0..len`.
pub fn make_index(len: usize) -> ChildIndex {
    (0..len as u32).collect()
}

/// Stable sort of `children` by `O`. Ties keep their input order.
pub fn sort<O: FlowOrder, T, A: FlowAdapter<T>>(adapter: &A, children: &mut [T]) {
    children.sort_by(|a, b| compare::<O, T, A>(adapter, a, b));
}

/// Sorts `children[offset..]`, leaving the prefix in place.
pub fn sort_partial<O: FlowOrder, T, A: FlowAdapter<T>>(
    adapter: &A,
    children: &mut [T],
    offset: usize,
) {
    if children.len() > offset {
        sort::<O, T, A>(adapter, &mut children[offset..]);
    }
}

fn compare<O: FlowOrder + ?Sized, T: ?Sized, A: FlowAdapter<T>>(
    adapter: &A,
    a: &T,
    b: &T,
) -> Ordering {
    O::rank(adapter, b).total_cmp(&O::rank(adapter, a))
}
