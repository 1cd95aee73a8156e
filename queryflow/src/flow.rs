//! Flow accumulators for AND, OR and AND-NOT nodes.
//!
//! A flow tracks the probability that evaluation still has to continue into
//! the next child. Children are folded in one at a time with [`Flow::add`];
//! the cost of a child is weighted by [`Flow::flow`] as read right before it
//! is added.

use enum_dispatch::enum_dispatch;
use log::trace;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::order::{make_index, sort, sort_partial, MinAndCost, MinOrCost, MinOrStrictCost};
use crate::strict::{promote_strict_child, select_strict_and_child};
use crate::{DefaultAdapter, FlowAdapter, FlowChild, IndirectAdapter};

/// Running state of one node while its children are folded in.
///
/// A flow is single shot: create it, add every child once, then read it.
#[enum_dispatch]
pub trait Flow {
    /// Folds in the estimate of the next child.
    fn add(&mut self, estimate: f64);
    /// Weight of the next child's cost.
    fn flow(&self) -> f64;
    /// Whether the next child is evaluated strictly.
    fn strict(&self) -> bool;
    /// Estimate of the node itself, 0 when no child was added.
    fn estimate(&self) -> f64;
}

/// Behavior shared by the concrete flow types.
pub trait FlowMixin: Flow + Sized {
    fn new(in_flow: f64, strict: bool) -> Self;

    /// Puts `children` in the order assumed by [`FlowMixin::cost_of`].
    fn sort<T, A: FlowAdapter<T>>(adapter: &A, children: &mut [T], strict: bool);

    fn estimate_of<T, A: FlowAdapter<T>>(adapter: &A, children: &[T]) -> f64 {
        estimate_of(adapter, children, Self::new(1.0, false))
    }

    /// Total cost of `children` once sorted. The children themselves are not
    /// moved, only an index buffer is.
    fn cost_of<T, A: FlowAdapter<T>>(adapter: &A, children: &[T], strict: bool) -> f64 {
        let index_adapter = IndirectAdapter::new(adapter, children);
        let mut order = make_index(children.len());
        Self::sort(&index_adapter, order.as_mut_slice(), strict);
        ordered_cost_of(&index_adapter, &order[..], Self::new(1.0, strict))
    }
}

/// Folds every child estimate into `flow` in the given order.
pub fn estimate_of<T, A: FlowAdapter<T>, F: Flow>(adapter: &A, children: &[T], mut flow: F) -> f64 {
    for child in children {
        flow.add(adapter.estimate(child));
    }
    flow.estimate()
}

/// Total cost of evaluating `children` in exactly the given order.
pub fn ordered_cost_of<T, A: FlowAdapter<T>, F: Flow>(
    adapter: &A,
    children: &[T],
    mut flow: F,
) -> f64 {
    let mut cost = 0.0;
    for child in children {
        let child_cost = if flow.strict() {
            adapter.strict_cost(child)
        } else {
            adapter.cost(child)
        };
        cost += flow.flow() * child_cost;
        flow.add(adapter.estimate(child));
    }
    cost
}

/// Only documents matching every earlier child reach the next one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AndFlow {
    flow: f64,
    strict: bool,
    first: bool,
}

impl Flow for AndFlow {
    fn add(&mut self, estimate: f64) {
        self.flow *= estimate;
        self.first = false;
    }

    fn flow(&self) -> f64 {
        self.flow
    }

    fn strict(&self) -> bool {
        self.strict && self.first
    }

    fn estimate(&self) -> f64 {
        if self.first {
            0.0
        } else {
            self.flow
        }
    }
}

impl FlowMixin for AndFlow {
    fn new(in_flow: f64, strict: bool) -> Self {
        Self {
            flow: in_flow,
            strict,
            first: true,
        }
    }

    fn sort<T, A: FlowAdapter<T>>(adapter: &A, children: &mut [T], strict: bool) {
        sort::<MinAndCost, T, A>(adapter, children);
        if strict && children.len() > 1 {
            let idx = select_strict_and_child(adapter, children);
            if idx > 0 {
                trace!("Promoting child {} of {} to strict AND driver", idx, children.len());
            }
            promote_strict_child(children, idx);
        }
    }
}

/// Only documents matching none of the earlier children reach the next one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrFlow {
    flow: f64,
    strict: bool,
    first: bool,
}

impl Flow for OrFlow {
    fn add(&mut self, estimate: f64) {
        self.flow *= 1.0 - estimate;
        self.first = false;
    }

    fn flow(&self) -> f64 {
        self.flow
    }

    fn strict(&self) -> bool {
        self.strict
    }

    fn estimate(&self) -> f64 {
        if self.first {
            0.0
        } else {
            1.0 - self.flow
        }
    }
}

impl FlowMixin for OrFlow {
    fn new(in_flow: f64, strict: bool) -> Self {
        Self {
            flow: in_flow,
            strict,
            first: true,
        }
    }

    fn sort<T, A: FlowAdapter<T>>(adapter: &A, children: &mut [T], strict: bool) {
        if strict {
            sort::<MinOrStrictCost, T, A>(adapter, children);
        } else {
            sort::<MinOrCost, T, A>(adapter, children);
        }
    }
}

/// The first child filters positively, every later child excludes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AndNotFlow {
    flow: f64,
    strict: bool,
    first: bool,
}

impl Flow for AndNotFlow {
    fn add(&mut self, estimate: f64) {
        self.flow *= if self.first { estimate } else { 1.0 - estimate };
        self.first = false;
    }

    fn flow(&self) -> f64 {
        self.flow
    }

    fn strict(&self) -> bool {
        self.strict && self.first
    }

    fn estimate(&self) -> f64 {
        if self.first {
            0.0
        } else {
            self.flow
        }
    }
}

impl FlowMixin for AndNotFlow {
    fn new(in_flow: f64, strict: bool) -> Self {
        Self {
            flow: in_flow,
            strict,
            first: true,
        }
    }

    /// The positive child stays first; only the exclusions are sorted.
    fn sort<T, A: FlowAdapter<T>>(adapter: &A, children: &mut [T], _strict: bool) {
        sort_partial::<MinOrCost, T, A>(adapter, children, 1);
    }
}

/// A flow for a node kind only known at runtime.
#[enum_dispatch(Flow)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnyFlow {
    AndFlow,
    OrFlow,
    AndNotFlow,
}

/// Kind of intermediate node.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum FlowKind {
    And,
    Or,
    AndNot,
}

impl FlowKind {
    pub fn flow(self, in_flow: f64, strict: bool) -> AnyFlow {
        match self {
            FlowKind::And => AndFlow::new(in_flow, strict).into(),
            FlowKind::Or => OrFlow::new(in_flow, strict).into(),
            FlowKind::AndNot => AndNotFlow::new(in_flow, strict).into(),
        }
    }

    pub fn estimate_of<T: FlowChild>(self, children: &[T]) -> f64 {
        estimate_of(&DefaultAdapter, children, self.flow(1.0, false))
    }

    pub fn cost_of<T: FlowChild>(self, children: &[T], strict: bool) -> f64 {
        self.cost_of_with(&DefaultAdapter, children, strict)
    }

    pub fn cost_of_with<T, A: FlowAdapter<T>>(self, adapter: &A, children: &[T], strict: bool) -> f64 {
        match self {
            FlowKind::And => AndFlow::cost_of(adapter, children, strict),
            FlowKind::Or => OrFlow::cost_of(adapter, children, strict),
            FlowKind::AndNot => AndNotFlow::cost_of(adapter, children, strict),
        }
    }

    /// Physically reorders `children` the way [`FlowKind::cost_of`] assumes.
    pub fn sort<T: FlowChild>(self, children: &mut [T], strict: bool) {
        self.sort_with(&DefaultAdapter, children, strict)
    }

    pub fn sort_with<T, A: FlowAdapter<T>>(self, adapter: &A, children: &mut [T], strict: bool) {
        match self {
            FlowKind::And => AndFlow::sort(adapter, children, strict),
            FlowKind::Or => OrFlow::sort(adapter, children, strict),
            FlowKind::AndNot => AndNotFlow::sort(adapter, children, strict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlowStats;
    use itertools::Itertools;
    use strum::IntoEnumIterator;

    fn assert_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn stats(estimate: f64, cost: f64) -> FlowStats {
        FlowStats::new(estimate, cost, cost)
    }

    fn mixed_children() -> Vec<FlowStats> {
        vec![
            FlowStats::new(0.3, 2.0, 0.3),
            FlowStats::new(0.9, 1.0, 0.9),
            FlowStats::new(0.05, 7.0, 0.4),
            FlowStats::new(0.6, 0.5, 3.0),
            FlowStats::new(0.15, 4.0, 0.2),
        ]
    }

    fn min_cost_over_permutations(kind: FlowKind, children: &[FlowStats], strict: bool) -> f64 {
        children
            .iter()
            .copied()
            .permutations(children.len())
            .map(|order| ordered_cost_of(&DefaultAdapter, &order, kind.flow(1.0, strict)))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_empty_flows_report_zero() {
        let children: Vec<FlowStats> = vec![];
        for kind in FlowKind::iter() {
            assert_eq!(0.0, kind.estimate_of(&children));
            assert_eq!(0.0, kind.cost_of(&children, false));
            assert_eq!(0.0, kind.cost_of(&children, true));
            assert_eq!(1.0, kind.flow(1.0, true).flow());
        }
    }

    #[test]
    fn test_and_estimate_is_product() {
        let children = vec![stats(0.1, 1.0), stats(0.5, 1.0)];
        assert_close(0.05, FlowKind::And.estimate_of(&children));
        assert_close(0.05, AndFlow::estimate_of(&DefaultAdapter, &children));
    }

    #[test]
    fn test_or_estimate() {
        let children = vec![stats(0.2, 1.0), stats(0.2, 1.0), stats(0.2, 1.0)];
        assert_close(0.488, FlowKind::Or.estimate_of(&children));
    }

    #[test]
    fn test_and_not_estimate() {
        let children = vec![stats(0.9, 1.0), stats(0.5, 2.0)];
        assert_close(0.45, FlowKind::AndNot.estimate_of(&children));
    }

    #[test]
    fn test_and_zero_estimate_kills_flow() {
        let mut flow = AndFlow::new(1.0, false);
        flow.add(0.5);
        flow.add(0.0);
        assert_eq!(0.0, flow.flow());
        flow.add(0.7);
        assert_eq!(0.0, flow.flow());
        assert_eq!(0.0, flow.estimate());
    }

    #[test]
    fn test_strict_only_for_first_child_of_and_like_flows() {
        let mut and = AndFlow::new(1.0, true);
        let mut and_not = AndNotFlow::new(1.0, true);
        let mut or = OrFlow::new(1.0, true);
        assert!(and.strict() && and_not.strict() && or.strict());

        and.add(0.5);
        and_not.add(0.5);
        or.add(0.5);
        assert!(!and.strict());
        assert!(!and_not.strict());
        assert!(or.strict());

        assert!(!AndFlow::new(1.0, false).strict());
        assert!(!OrFlow::new(1.0, false).strict());
    }

    #[test]
    fn test_any_flow_matches_concrete_flow() {
        let mut any = FlowKind::AndNot.flow(1.0, false);
        let mut concrete = AndNotFlow::new(1.0, false);
        for est in [0.8, 0.25, 0.5] {
            any.add(est);
            concrete.add(est);
            assert_eq!(concrete.flow(), any.flow());
        }
        assert_eq!(concrete.estimate(), any.estimate());
    }

    #[test]
    fn test_and_cost_orders_cheap_rejection_first() {
        let children = vec![stats(0.1, 10.0), stats(0.5, 1.0)];
        // (0.5, 1) first: 1 * 1 + 0.5 * 10
        assert_close(6.0, FlowKind::And.cost_of(&children, false));

        let mut sorted = children.clone();
        FlowKind::And.sort(&mut sorted, false);
        assert_eq!(0.5, sorted[0].estimate);
    }

    #[test]
    fn test_or_cost() {
        let children = vec![stats(0.2, 1.0), stats(0.8, 1.0)];
        // 1 * 1 + (1 - 0.8) * 1
        assert_close(1.2, FlowKind::Or.cost_of(&children, false));
    }

    #[test]
    fn test_or_strict_cost_uses_strict_cost_everywhere() {
        let children = vec![FlowStats::new(0.5, 1.0, 4.0), FlowStats::new(0.5, 1.0, 2.0)];
        // strict order puts the cheaper strict child first: 2 + 0.5 * 4
        assert_close(4.0, FlowKind::Or.cost_of(&children, true));
        assert_close(1.5, FlowKind::Or.cost_of(&children, false));
    }

    #[test]
    fn test_and_not_keeps_positive_child_first() {
        let children = vec![stats(0.9, 1.0), stats(0.1, 1.0), stats(0.5, 2.0)];
        let mut sorted = children.clone();
        FlowKind::AndNot.sort(&mut sorted, false);
        assert_eq!(children[0], sorted[0]);
        assert_eq!(0.5, sorted[1].estimate);

        // 1 * 1 + 0.9 * 2 + 0.9 * 0.5 * 1
        assert_close(3.25, FlowKind::AndNot.cost_of(&children, false));
    }

    #[test]
    fn test_and_not_first_child_stays_even_when_it_would_sort_later() {
        let children = vec![stats(0.01, 50.0), stats(0.9, 1.0)];
        let mut sorted = children.clone();
        FlowKind::AndNot.sort(&mut sorted, true);
        assert_eq!(children, sorted);
    }

    #[test]
    fn test_and_not_strict_cost_applies_to_first_child_only() {
        let children = vec![FlowStats::new(0.9, 1.0, 0.9), stats(0.5, 2.0), stats(0.1, 1.0)];
        // 0.9 + 0.9 * 2 + 0.9 * 0.5 * 1
        assert_close(3.15, FlowKind::AndNot.cost_of(&children, true));
    }

    #[test]
    fn test_strict_and_promotes_cheap_strict_child() {
        let children = vec![
            FlowStats::new(0.5, 1.0, 10.0),
            FlowStats::new(0.1, 2.0, 0.1),
        ];
        let mut sorted = children.clone();
        FlowKind::And.sort(&mut sorted, true);
        assert_eq!(children[1], sorted[0]);
        assert_eq!(children[0], sorted[1]);

        // 0.1 (strict) + 0.1 * 1
        assert_close(0.2, FlowKind::And.cost_of(&children, true));
        // (0.5, 1) first: 1 + 0.5 * 2
        assert_close(2.0, FlowKind::And.cost_of(&children, false));
    }

    #[test]
    fn test_strict_single_child_and() {
        let children = vec![FlowStats::new(0.3, 1.0, 5.0)];
        assert_close(5.0, FlowKind::And.cost_of(&children, true));
        assert_close(1.0, FlowKind::And.cost_of(&children, false));
    }

    #[test]
    fn test_cost_of_does_not_move_children() {
        let children = mixed_children();
        let before = children.clone();
        for kind in FlowKind::iter() {
            kind.cost_of(&children, true);
            kind.cost_of(&children, false);
        }
        assert_eq!(before, children);
    }

    #[test]
    fn test_sorted_children_keep_their_cost() {
        for kind in FlowKind::iter() {
            for strict in [false, true] {
                let children = mixed_children();
                let expected = kind.cost_of(&children, strict);

                let mut sorted = children.clone();
                kind.sort(&mut sorted, strict);
                let ordered = ordered_cost_of(&DefaultAdapter, &sorted, kind.flow(1.0, strict));
                assert_close(expected, ordered);
                assert_close(expected, kind.cost_of(&sorted, strict));
            }
        }
    }

    #[test]
    fn test_non_strict_and_or_orders_are_optimal() {
        let children = mixed_children();
        for kind in [FlowKind::And, FlowKind::Or] {
            let best = min_cost_over_permutations(kind, &children, false);
            assert_close(best, kind.cost_of(&children, false));
        }
        let best = min_cost_over_permutations(FlowKind::Or, &children, true);
        assert_close(best, FlowKind::Or.cost_of(&children, true));
    }

    #[test]
    fn test_free_children_keep_orders_optimal() {
        for (kind, free) in [
            (FlowKind::And, FlowStats::new(1.0, 0.0, 0.0)),
            (FlowKind::Or, FlowStats::new(0.0, 0.0, 0.0)),
        ] {
            let mut children = mixed_children();
            children.insert(0, free);
            let best = min_cost_over_permutations(kind, &children, false);
            assert_close(best, kind.cost_of(&children, false));

            let mut sorted = children.clone();
            kind.sort(&mut sorted, true);
            let ordered = ordered_cost_of(&DefaultAdapter, &sorted, kind.flow(1.0, true));
            assert_close(kind.cost_of(&children, true), ordered);
        }
    }

    #[test]
    fn test_adjacent_swap_never_helps_and() {
        let mut sorted = mixed_children();
        FlowKind::And.sort(&mut sorted, false);
        let cost = ordered_cost_of(&DefaultAdapter, &sorted, AndFlow::new(1.0, false));
        for i in 0..sorted.len() - 1 {
            let mut swapped = sorted.clone();
            swapped.swap(i, i + 1);
            let swapped_cost = ordered_cost_of(&DefaultAdapter, &swapped, AndFlow::new(1.0, false));
            assert!(swapped_cost >= cost - 1e-12);
        }
    }

    #[test]
    fn test_strict_and_never_worse_than_first_child_driver() {
        let children = mixed_children();
        let mut plain = children.clone();
        sort::<MinAndCost, _, _>(&DefaultAdapter, &mut plain);
        let baseline = ordered_cost_of(&DefaultAdapter, &plain, AndFlow::new(1.0, true));
        assert!(FlowKind::And.cost_of(&children, true) <= baseline + 1e-12);
    }

    #[test]
    fn test_direct_and_boxed_children_agree() {
        let children = mixed_children();
        let boxed: Vec<Box<dyn FlowChild>> = children
            .iter()
            .map(|c| Box::new(*c) as Box<dyn FlowChild>)
            .collect();
        for kind in FlowKind::iter() {
            assert_eq!(kind.estimate_of(&children), kind.estimate_of(&boxed));
            assert_eq!(kind.cost_of(&children, true), kind.cost_of(&boxed, true));
        }
    }

    #[test]
    fn test_flow_kind_names() {
        assert_eq!("and_not", FlowKind::AndNot.as_ref());
        assert_eq!("or", FlowKind::Or.to_string());
        assert_eq!(FlowKind::And, "and".parse::<FlowKind>().unwrap());
        assert!("nand".parse::<FlowKind>().is_err());
    }
}
