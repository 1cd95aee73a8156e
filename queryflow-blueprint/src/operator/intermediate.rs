use std::fmt::Formatter;

use queryflow::{AndFlow, AndNotFlow, DefaultAdapter, FlowKind, FlowMixin, FlowStats, OrFlow};

use crate::operator::{DisplayFields, OperatorTrait};
use crate::plan::Blueprint;

/// Matches documents matched by all children.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct And;

/// Matches documents matched by any child.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct Or;

/// Matches documents matched by the first child and by none of the others.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct AndNot;

fn intermediate_flow_stats<F: FlowMixin>(children: &[Blueprint]) -> FlowStats {
    FlowStats::new(
        F::estimate_of(&DefaultAdapter, children),
        F::cost_of(&DefaultAdapter, children, false),
        F::cost_of(&DefaultAdapter, children, true),
    )
}

impl OperatorTrait for And {
    fn calculate_flow_stats(&self, children: &[Blueprint], _docid_limit: u32) -> FlowStats {
        intermediate_flow_stats::<AndFlow>(children)
    }

    fn flow_kind(&self) -> Option<FlowKind> {
        Some(FlowKind::And)
    }
}

impl OperatorTrait for Or {
    fn calculate_flow_stats(&self, children: &[Blueprint], _docid_limit: u32) -> FlowStats {
        intermediate_flow_stats::<OrFlow>(children)
    }

    fn flow_kind(&self) -> Option<FlowKind> {
        Some(FlowKind::Or)
    }
}

impl OperatorTrait for AndNot {
    fn calculate_flow_stats(&self, children: &[Blueprint], _docid_limit: u32) -> FlowStats {
        intermediate_flow_stats::<AndNotFlow>(children)
    }

    fn flow_kind(&self) -> Option<FlowKind> {
        Some(FlowKind::AndNot)
    }
}

impl DisplayFields for And {
    fn display(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl DisplayFields for Or {
    fn display(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl DisplayFields for AndNot {
    fn display(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}
