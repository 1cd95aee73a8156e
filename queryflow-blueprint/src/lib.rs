//! Query blueprints optimized with [`queryflow`].
//!
//! A blueprint is the tree of AND, OR and AND-NOT nodes a query planner builds before any
//! iterator is created. The [`optimizer::Optimizer`] calculates flow stats for every node
//! bottom-up, then walks the tree top-down to put children in their cheapest evaluation order
//! and to decide which of them are evaluated strictly.
//!
//! * [`operator`] Leaf and intermediate operators.
//! * [`plan`] The blueprint tree, its builder, json description and explain output.
//! * [`optimizer`] The optimization pass and its options.
pub mod error;
pub mod operator;
pub mod optimizer;
pub mod plan;
