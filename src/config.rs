//! planlens configuration file
//!
//! A single JSON object. Only `catalog_path` is required:
//!
//! ```json
//! {
//!   "catalog_path": "./plans.json",
//!   "emphasis": { "start": "<b>", "end": "</b>" },
//!   "http": { "host": "0.0.0.0", "port": 5000 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::annotate::Emphasis;
use crate::http_server::HttpServerConfig;
use crate::observability::{Event, Logger};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanLensConfig {
    /// Plan catalog served by the replay planner (required)
    pub catalog_path: PathBuf,

    /// Markers placed around key terms in narration
    #[serde(default)]
    pub emphasis: Emphasis,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

impl PlanLensConfig {
    /// Config for a catalog with every other setting defaulted
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            emphasis: Emphasis::default(),
            http: HttpServerConfig::default(),
        }
    }

    /// Load and validate configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;

        let mut config: PlanLensConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;

        // A relative catalog path is relative to the config file
        if config.catalog_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.catalog_path = dir.join(&config.catalog_path);
            }
        }

        let display = path.display().to_string();
        Logger::info(Event::ConfigLoaded.as_str(), &[("path", display.as_str())]);

        Ok(config)
    }

    /// Check field constraints
    pub fn validate(&self) -> ConfigResult<()> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("catalog_path must not be empty".into()));
        }

        if self.http.port == 0 {
            return Err(ConfigError::Invalid("http.port must be > 0".into()));
        }

        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Invalid("http.host must not be empty".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("planlens.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"catalog_path": "plans.json"}"#);
        let config = PlanLensConfig::load(&path).unwrap();

        assert_eq!(config.catalog_path, dir.path().join("plans.json"));
        assert_eq!(config.emphasis, Emphasis::default());
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn test_overrides() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"{"catalog_path": "/srv/plans.json",
                "emphasis": {"start": "**", "end": "**"},
                "http": {"port": 8080}}"#,
        );
        let config = PlanLensConfig::load(&path).unwrap();

        assert_eq!(config.catalog_path, PathBuf::from("/srv/plans.json"));
        assert_eq!(config.emphasis.start, "**");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn test_missing_catalog_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"http": {"port": 8080}}"#);
        assert!(matches!(PlanLensConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_port_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"catalog_path": "plans.json", "http": {"port": 0}}"#);
        assert!(matches!(PlanLensConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_catalog_path_rejected() {
        assert!(PlanLensConfig::new("").validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = PlanLensConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config"));
    }
}
