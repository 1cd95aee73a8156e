use derive_more::Constructor;
use serde::{Deserialize, Serialize};

use crate::FlowChild;

/// Flow statistics as plain values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Constructor, Serialize, Deserialize)]
pub struct FlowStats {
    /// Match probability in `[0, 1]`.
    pub estimate: f64,
    pub cost: f64,
    pub strict_cost: f64,
}

impl FlowChild for FlowStats {
    fn estimate(&self) -> f64 {
        self.estimate
    }

    fn cost(&self) -> f64 {
        self.cost
    }

    fn strict_cost(&self) -> f64 {
        self.strict_cost
    }
}
