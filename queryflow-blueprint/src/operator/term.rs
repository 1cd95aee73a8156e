use std::fmt::Formatter;

use queryflow::{FlowKind, FlowStats};

use crate::operator::{DisplayFields, OperatorTrait};
use crate::plan::Blueprint;

/// Posting list of a single term in a field.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Term {
    field: String,
    term: String,
    /// Estimated number of matching documents.
    hits: u32,
}

impl Term {
    pub fn new<F: Into<String>, T: Into<String>>(field: F, term: T, hits: u32) -> Self {
        Self {
            field: field.into(),
            term: term.into(),
            hits,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }
}

/// Fraction of the document id space covered by `hits`.
pub fn relative_estimate(hits: u32, docid_limit: u32) -> f64 {
    if docid_limit == 0 {
        return 0.0;
    }
    hits.min(docid_limit) as f64 / docid_limit as f64
}

impl OperatorTrait for Term {
    /// Probing costs one unit, iterating costs one unit per hit.
    fn calculate_flow_stats(&self, _children: &[Blueprint], docid_limit: u32) -> FlowStats {
        let estimate = relative_estimate(self.hits, docid_limit);
        FlowStats::new(estimate, 1.0, estimate)
    }

    fn flow_kind(&self) -> Option<FlowKind> {
        None
    }
}

impl DisplayFields for Term {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("")
            .field("field", &self.field)
            .field("term", &self.term)
            .field("hits", &self.hits)
            .finish()
    }
}
