//! CLI-specific error types

use std::fmt;
use std::io;

use crate::analysis::AnalysisError;
use crate::config::ConfigError;
use crate::plan::PlanError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Malformed request or plan document
    InvalidInput,
    /// Analysis failed; carries the analysis error code
    Analysis(&'static str),
    /// Server could not start
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PLANLENS_CLI_CONFIG_ERROR",
            Self::IoError => "PLANLENS_CLI_IO_ERROR",
            Self::InvalidInput => "PLANLENS_CLI_INVALID_INPUT",
            Self::Analysis(code) => *code,
            Self::ServeFailed => "PLANLENS_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid request or plan
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Server failed to start or stopped with an error
    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<PlanError> for CliError {
    fn from(e: PlanError) -> Self {
        Self::invalid_input(e.to_string())
    }
}

impl From<AnalysisError> for CliError {
    fn from(e: AnalysisError) -> Self {
        Self::new(CliErrorCode::Analysis(e.code()), e.message())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_keeps_code() {
        let err = CliError::from(AnalysisError::InvalidQuery("syntax error".into()));
        assert_eq!(err.code_str(), "PLANLENS_INVALID_QUERY");
        assert_eq!(err.message(), "Invalid SQL query!");
    }

    #[test]
    fn test_display() {
        let err = CliError::config_error("catalog_path must not be empty");
        assert_eq!(
            err.to_string(),
            "PLANLENS_CLI_CONFIG_ERROR: catalog_path must not be empty"
        );
    }
}
