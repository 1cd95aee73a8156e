use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::{log_enabled, trace, Level};
use queryflow::{Flow, FlowChild, FlowStats};

use crate::operator::{Operator, OperatorTrait};

mod builder;
pub use builder::*;
pub mod explain;
mod query;
pub use query::*;

/// One node of a query blueprint.
///
/// A blueprint owns its children, so reordering them during optimization moves the subtrees
/// themselves. Flow stats are absent until [`Blueprint::calculate_flow_stats`] has run.
#[derive(Clone, Debug, PartialEq)]
pub struct Blueprint {
    operator: Operator,
    children: Vec<Blueprint>,
    stats: Option<FlowStats>,
    strict: bool,
}

impl Blueprint {
    pub fn new<O: Into<Operator>>(operator: O, children: Vec<Blueprint>) -> Self {
        Self {
            operator: operator.into(),
            children,
            stats: None,
            strict: false,
        }
    }

    pub fn leaf<O: Into<Operator>>(operator: O) -> Self {
        Self::new(operator, vec![])
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn children(&self) -> &[Blueprint] {
        &self.children
    }

    pub fn stats(&self) -> Option<FlowStats> {
        self.stats
    }

    /// Calculated stats, or all zeros before calculation.
    pub fn flow_stats(&self) -> FlowStats {
        self.stats.unwrap_or_default()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Expected cost of evaluating this node in its current strictness.
    pub fn total_cost(&self) -> f64 {
        let stats = self.flow_stats();
        if self.strict {
            stats.strict_cost
        } else {
            stats.cost
        }
    }

    /// Calculates flow stats of the whole subtree, children before parents.
    pub fn calculate_flow_stats(&mut self, docid_limit: u32) {
        for child in &mut self.children {
            child.calculate_flow_stats(docid_limit);
        }
        self.stats = Some(self.operator.calculate_flow_stats(&self.children, docid_limit));
    }

    /// Marks this node strict or not, and propagates strictness to the subtree.
    ///
    /// With `sort_by_cost` the children are first put in the order the flow stats assumed.
    /// Without it the given order is kept and the stats still describe the cheapest order. Each
    /// child is strict exactly when the flow of this node asks for strictness before it.
    pub fn sort(&mut self, strict: bool, sort_by_cost: bool) {
        self.strict = strict;
        let kind = match self.operator.flow_kind() {
            Some(kind) => kind,
            None => return,
        };

        if sort_by_cost {
            kind.sort(self.children.as_mut_slice(), strict);
            if log_enabled!(Level::Trace) {
                trace!(
                    "Sorted children of {}: [{}]",
                    self.operator,
                    self.children.iter().map(|c| c.operator()).join(", ")
                );
            }
        }

        let mut flow = kind.flow(1.0, strict);
        for child in &mut self.children {
            child.sort(flow.strict(), sort_by_cost);
            flow.add(child.flow_stats().estimate);
        }
    }
}

impl FlowChild for Blueprint {
    fn estimate(&self) -> f64 {
        self.flow_stats().estimate
    }

    fn cost(&self) -> f64 {
        self.flow_stats().cost
    }

    fn strict_cost(&self) -> f64 {
        self.flow_stats().strict_cost
    }
}

impl Display for Blueprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.operator)?;
        if let Some(stats) = &self.stats {
            write!(
                f,
                " (estimate={:.3} cost={:.3} strict_cost={:.3})",
                stats.estimate, stats.cost, stats.strict_cost
            )?;
        }
        if self.strict {
            write!(f, " strict")?;
        }
        Ok(())
    }
}
