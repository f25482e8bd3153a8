//! Planner session errors
//!
//! The session is the only component that talks to the planner, so it is
//! the one that distinguishes a bad query from an unreachable planner.

use thiserror::Error;

use crate::plan::PlanError;

/// Result type for planner session calls
pub type SessionResult<T> = Result<T, SessionError>;

/// Failures reported by a planner session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The query is syntactically or semantically invalid; do not retry
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The planner could not be reached
    #[error("Planner unavailable: {0}")]
    Unavailable(String),

    /// The planner rejected a configuration parameter
    #[error("unrecognized configuration parameter \"{0}\"")]
    UnknownKnob(String),

    /// Any other planner failure
    #[error("Planner failure: {0}")]
    Failed(String),
}

/// Failures of a single explain round trip
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExplainError {
    /// The session call failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The planner answered with a document that is not a valid plan
    #[error(transparent)]
    Plan(#[from] PlanError),
}
