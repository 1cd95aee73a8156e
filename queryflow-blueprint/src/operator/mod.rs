//! Blueprint operators.
//!
//! Leaves ([`Term`], [`Opaque`]) know their own flow stats. Intermediate operators ([`And`],
//! [`Or`], [`AndNot`]) derive theirs from their children through the matching flow of
//! [`queryflow`].
mod term;
pub use term::*;
mod opaque;
pub use opaque::*;
mod intermediate;
pub use intermediate::*;

use std::fmt::{Display, Formatter};

use enum_as_inner::EnumAsInner;
use enum_dispatch::enum_dispatch;
use queryflow::{FlowKind, FlowStats};
use strum_macros::AsRefStr;

use crate::plan::Blueprint;

#[derive(Clone, Debug, PartialEq, EnumAsInner, AsRefStr)]
#[enum_dispatch]
pub enum Operator {
    Term(Term),
    Opaque(Opaque),
    And(And),
    Or(Or),
    AndNot(AndNot),
}

#[enum_dispatch(Operator)]
pub trait OperatorTrait {
    /// Flow stats of this node. Stats of `children` must already be calculated.
    fn calculate_flow_stats(&self, children: &[Blueprint], docid_limit: u32) -> FlowStats;

    /// Kind of flow through the children, `None` for leaves.
    fn flow_kind(&self) -> Option<FlowKind>;
}

#[enum_dispatch(Operator)]
pub trait DisplayFields {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result;
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())?;
        self.display(f)
    }
}
