use thiserror::Error;

use queryflow::FlowStats;

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("Invalid flow stats for {label}: {stats:?}")]
    InvalidFlowStats { label: String, stats: FlowStats },
    #[error("Document id limit must be positive.")]
    InvalidDocidLimit,
    #[error("Failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BlueprintResult<T> = Result<T, BlueprintError>;
