use serde::{Deserialize, Serialize};

use queryflow::FlowStats;

use crate::error::{BlueprintError, BlueprintResult};
use crate::operator::{And, AndNot, Opaque, Operator, Or, Term};
use crate::plan::Blueprint;

/// Serializable description of a query tree.
///
/// ```json
/// {"type": "and", "children": [
///     {"type": "term", "field": "title", "term": "rust", "hits": 100},
///     {"type": "opaque", "label": "geo", "estimate": 0.2, "cost": 3.0, "strict_cost": 1.5}
/// ]}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryNode {
    And {
        children: Vec<QueryNode>,
    },
    Or {
        children: Vec<QueryNode>,
    },
    AndNot {
        children: Vec<QueryNode>,
    },
    Term {
        field: String,
        term: String,
        hits: u32,
    },
    Opaque {
        label: String,
        #[serde(flatten)]
        stats: FlowStats,
    },
}

impl TryFrom<QueryNode> for Blueprint {
    type Error = BlueprintError;

    fn try_from(node: QueryNode) -> BlueprintResult<Self> {
        let (operator, children): (Operator, _) = match node {
            QueryNode::And { children } => (And.into(), children),
            QueryNode::Or { children } => (Or.into(), children),
            QueryNode::AndNot { children } => (AndNot.into(), children),
            QueryNode::Term { field, term, hits } => (Term::new(field, term, hits).into(), vec![]),
            QueryNode::Opaque { label, stats } => (Opaque::new(label, stats)?.into(), vec![]),
        };

        let children = children
            .into_iter()
            .map(Blueprint::try_from)
            .collect::<BlueprintResult<Vec<Blueprint>>>()?;
        Ok(Blueprint::new(operator, children))
    }
}

impl Blueprint {
    pub fn from_json(json: &str) -> BlueprintResult<Self> {
        let node: QueryNode = serde_json::from_str(json)?;
        Blueprint::try_from(node)
    }
}
