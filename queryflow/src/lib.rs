//! ## Background
//!
//! A boolean query is evaluated as a tree of AND, OR and AND-NOT nodes whose leaves are
//! term or sub-expression iterators. For every child we know an estimate (the probability that
//! it matches an arbitrary document), the cost of probing it for a given document, and the cost
//! of iterating it strictly, i.e. producing every match in increasing document order.
//!
//! Evaluation order matters. An AND only needs to look at its second child for documents
//! accepted by the first one, so putting a cheap, selective child first cuts the work of all
//! later children. The same reasoning applies to an OR with the roles of matching and
//! non-matching swapped. This crate computes the expected cost of a node under the best order
//! it can find, and the order itself.
//!
//! ## Design
//!
//! * [`adapter`] How children expose their statistics.
//! * [`order`] Pairwise ordering policies and the sorts built on them.
//! * [`flow`] Per node kind accumulators and the `estimate_of` / `cost_of` queries.
//! * [`strict`] Picking the strict driver of a strict AND.
//!
//! All functions are total and allocation is limited to a small index buffer per call. Inputs
//! are trusted: an estimate outside `[0, 1]` or a negative cost is not detected.
//!
//! ## Reference
//!
//! 1. Smith, W.E., 1956. Various optimizers for single-stage production. Naval Research
//! Logistics Quarterly, 3(1-2), pp.59-66.
//! 2. Hellerstein, J.M. and Stonebraker, M., 1993. Predicate migration: optimizing queries with
//! expensive predicates. In Proceedings of the 1993 ACM SIGMOD international conference on
//! Management of data (pp. 267-276).

pub mod adapter;
pub mod flow;
pub mod order;
mod stats;
pub mod strict;

pub use adapter::{DefaultAdapter, FlowAdapter, FlowChild, IndirectAdapter};
pub use flow::{
    estimate_of, ordered_cost_of, AndFlow, AndNotFlow, AnyFlow, Flow, FlowKind, FlowMixin, OrFlow,
};
pub use order::{
    make_index, sort, sort_partial, ChildIndex, FlowOrder, MinAndCost, MinOrCost, MinOrStrictCost,
};
pub use stats::FlowStats;
pub use strict::{promote_strict_child, select_strict_and_child};
