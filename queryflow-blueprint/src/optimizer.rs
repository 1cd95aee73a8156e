use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BlueprintError, BlueprintResult};
use crate::plan::Blueprint;

fn default_true() -> bool {
    true
}

/// Options of one optimization pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizerOptions {
    /// Size of the document id space; term hit counts are relative to it.
    pub docid_limit: u32,
    /// Reorder children by expected cost. Strictness is propagated either way.
    #[serde(default = "default_true")]
    pub sort_by_cost: bool,
    /// Whether the root has to produce its matches strictly.
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl OptimizerOptions {
    pub fn new(docid_limit: u32) -> Self {
        Self {
            docid_limit,
            sort_by_cost: true,
            strict: true,
        }
    }
}

/// Calculates flow stats of a blueprint and puts every node's children in cheapest order.
pub struct Optimizer {
    options: OptimizerOptions,
}

impl Optimizer {
    pub fn new(options: OptimizerOptions) -> BlueprintResult<Self> {
        if options.docid_limit == 0 {
            return Err(BlueprintError::InvalidDocidLimit);
        }
        Ok(Self { options })
    }

    pub fn from_json(json: &str) -> BlueprintResult<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    pub fn optimize(&self, mut root: Blueprint) -> Blueprint {
        debug!(
            "Optimizing blueprint {} with docid limit {}",
            root.operator(),
            self.options.docid_limit
        );
        root.calculate_flow_stats(self.options.docid_limit);
        root.sort(self.options.strict, self.options.sort_by_cost);
        debug!("Optimized blueprint, total cost {:.3}", root.total_cost());
        root
    }
}
