//! Configuration module for nepsum
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`NEPSUM_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use nepsum::config::NepsumConfig;
//!
//! let config = NepsumConfig::default();
//! assert_eq!(config.history.capacity, 5);
//!
//! let toml = r#"
//! [service]
//! endpoint = "http://summarizer.internal:5000/"
//! "#;
//! let config: NepsumConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.service.endpoint, "http://summarizer.internal:5000/");
//! ```

pub mod error;
pub mod eta;
pub mod history;
pub mod logging;
pub mod service;

pub use error::ConfigError;
pub use eta::EtaConfig;
pub use history::HistoryConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use service::ServiceConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the nepsum client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NepsumConfig {
    /// Summarization backend
    pub service: ServiceConfig,
    /// Countdown estimate tuning
    pub eta: EtaConfig,
    /// Result history
    pub history: HistoryConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl NepsumConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("NEPSUM_ENDPOINT") {
            self.service.endpoint = endpoint;
        }
        if let Ok(timeout) = std::env::var("NEPSUM_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.service.request_timeout_seconds = t;
            }
        }
        if let Ok(length) = std::env::var("NEPSUM_LENGTH") {
            if let Ok(l) = length.parse() {
                self.service.default_length = l;
            }
        }

        if let Ok(level) = std::env::var("NEPSUM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NEPSUM_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.service.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::invalid(
                "service.endpoint",
                "endpoint cannot be empty",
            ));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "service.endpoint",
                "endpoint must be an http:// or https:// URL",
            ));
        }
        if self.service.request_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "service.request_timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        let default_estimate = self.eta.default_estimate_seconds;
        if !default_estimate.is_finite() || default_estimate < 0.0 {
            return Err(ConfigError::invalid(
                "eta.default_estimate_seconds",
                "estimate must be a finite, non-negative number of seconds",
            ));
        }
        if default_estimate > eta::MAX_ESTIMATE_SECONDS {
            return Err(ConfigError::invalid(
                "eta.default_estimate_seconds",
                format!("estimate must not exceed {} seconds", eta::MAX_ESTIMATE_SECONDS),
            ));
        }
        let factor = self.eta.smoothing_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::invalid(
                "eta.smoothing_factor",
                "factor must be in (0, 1]",
            ));
        }
        if self.eta.tick_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "eta.tick_interval_ms",
                "tick interval must be non-zero",
            ));
        }

        if self.history.capacity == 0 {
            return Err(ConfigError::invalid(
                "history.capacity",
                "capacity must be at least 1",
            ));
        }

        Ok(())
    }
}
