use std::fmt::Formatter;

use queryflow::{FlowKind, FlowStats};

use crate::error::{BlueprintError, BlueprintResult};
use crate::operator::{DisplayFields, OperatorTrait};
use crate::plan::Blueprint;

/// Leaf whose flow stats are supplied by the caller, e.g. a sub-expression planned elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct Opaque {
    label: String,
    stats: FlowStats,
}

impl Opaque {
    /// Fails unless the estimate is in `[0, 1]` and both costs are finite and non-negative.
    pub fn new<S: Into<String>>(label: S, stats: FlowStats) -> BlueprintResult<Self> {
        let label = label.into();
        let valid_cost = |c: f64| c.is_finite() && c >= 0.0;
        if !(0.0..=1.0).contains(&stats.estimate)
            || !valid_cost(stats.cost)
            || !valid_cost(stats.strict_cost)
        {
            return Err(BlueprintError::InvalidFlowStats { label, stats });
        }
        Ok(Self { label, stats })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl OperatorTrait for Opaque {
    fn calculate_flow_stats(&self, _children: &[Blueprint], _docid_limit: u32) -> FlowStats {
        self.stats
    }

    fn flow_kind(&self) -> Option<FlowKind> {
        None
    }
}

impl DisplayFields for Opaque {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("").field("label", &self.label).finish()
    }
}
