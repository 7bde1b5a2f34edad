//! Summarization service endpoint configuration

use crate::client::LengthPreference;
use serde::{Deserialize, Serialize};

/// Where the summarization backend lives and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Full URL the request body is POSTed to
    pub endpoint: String,
    /// The backend runs the model synchronously, so this is generous
    pub request_timeout_seconds: u64,
    /// Length used when the caller does not pick one
    pub default_length: LengthPreference,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/".to_string(),
            request_timeout_seconds: 300,
            default_length: LengthPreference::Short,
        }
    }
}
