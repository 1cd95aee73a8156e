//! Choosing the strict driver of a strict AND.
//!
//! A strict AND iterates exactly one child strictly and probes the rest. The
//! children are expected to already be in [`MinAndCost`](crate::MinAndCost)
//! order; the selection only decides which of them to move to the front.

use crate::FlowAdapter;

/// Returns the position of the child that minimizes total cost when it is
/// evaluated strictly and moved in front of the others.
///
/// Candidate `i` is compared against keeping child 0 as the strict driver:
/// it pays its strict cost and is no longer gated by the children before
/// it, while those children become gated by its estimate instead.
pub fn select_strict_and_child<T, A: FlowAdapter<T>>(adapter: &A, children: &[T]) -> usize {
    let mut cost = 0.0;
    let mut est = 1.0;
    let mut best_idx = 0;
    let mut best_diff = 0.0;
    for (idx, child) in children.iter().enumerate() {
        let child_cost = est * adapter.cost(child);
        let child_strict_cost = adapter.strict_cost(child);
        let child_est = adapter.estimate(child);
        if idx == 0 {
            best_diff = child_strict_cost - child_cost;
        } else {
            let my_diff = (child_strict_cost + child_est * cost) - (cost + child_cost);
            if my_diff < best_diff {
                best_diff = my_diff;
                best_idx = idx;
            }
        }
        cost += child_cost;
        est *= child_est;
    }
    best_idx
}

/// Moves `children[idx]` to the front, shifting `children[..idx]` one step
/// back. Everything after `idx` stays where it is.
pub fn promote_strict_child<T>(children: &mut [T], idx: usize) {
    if idx > 0 {
        children[..=idx].rotate_right(1);
    }
}
