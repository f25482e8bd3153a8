//! Analysis errors
//!
//! Every collaborator failure is classified into one of three kinds before
//! it leaves the engine:
//! - InvalidQuery: the planner rejected the query; shown verbatim, not retried
//! - Unavailable: the planner could not be reached
//! - Internal: anything else, detail kept for diagnostics

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::plan::PlanError;
use crate::session::{ExplainError, SessionError};

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Coarse error classification exposed to presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidQuery,
    Unavailable,
    Internal,
}

impl ErrorKind {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidQuery => "PLANLENS_INVALID_QUERY",
            ErrorKind::Unavailable => "PLANLENS_UNAVAILABLE",
            ErrorKind::Internal => "PLANLENS_INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failure of a whole analysis request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Nothing to analyze
    #[error("No query provided!")]
    EmptyQuery,

    /// The planner rejected the query
    #[error("Invalid SQL query!")]
    InvalidQuery(String),

    /// The planner could not be reached
    #[error("Failed to connect to the database! Please ensure that the database is running.")]
    Unavailable(String),

    /// Anything else, including malformed plans
    #[error("An error has occurred: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::EmptyQuery | AnalysisError::InvalidQuery(_) => ErrorKind::InvalidQuery,
            AnalysisError::Unavailable(_) => ErrorKind::Unavailable,
            AnalysisError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// User-facing message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Underlying detail, for logs
    pub fn detail(&self) -> &str {
        match self {
            AnalysisError::EmptyQuery => "empty query",
            AnalysisError::InvalidQuery(d)
            | AnalysisError::Unavailable(d)
            | AnalysisError::Internal(d) => d,
        }
    }
}

impl From<SessionError> for AnalysisError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::InvalidQuery(detail) => AnalysisError::InvalidQuery(detail),
            SessionError::Unavailable(detail) => AnalysisError::Unavailable(detail),
            other => AnalysisError::Internal(other.to_string()),
        }
    }
}

impl From<PlanError> for AnalysisError {
    fn from(e: PlanError) -> Self {
        AnalysisError::Internal(e.to_string())
    }
}

impl From<ExplainError> for AnalysisError {
    fn from(e: ExplainError) -> Self {
        match e {
            ExplainError::Session(s) => s.into(),
            ExplainError::Plan(p) => p.into(),
        }
    }
}
