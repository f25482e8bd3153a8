//! Plan model errors
//!
//! A malformed plan is one the planner should never have produced: a node
//! without a `Node Type`, a missing or non-numeric `Total Cost`, or a
//! `Plans` entry that is not a list of nodes.

use thiserror::Error;

/// Result type for plan parsing and traversal
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors raised while building or reading a plan tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A node is missing a required field or has the wrong shape
    #[error("Malformed plan at {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// The document does not contain a plan at all
    #[error("Plan document is empty")]
    EmptyDocument,

    /// The raw document is not valid JSON
    #[error("Plan document is not valid JSON: {0}")]
    InvalidJson(String),
}

impl PlanError {
    /// Create a malformed plan error for the node at `path`
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Path of the offending node, if known
    pub fn path(&self) -> Option<&str> {
        match self {
            PlanError::Malformed { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidJson(e.to_string())
    }
}
