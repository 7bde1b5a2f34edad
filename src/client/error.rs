//! Error types for summarization requests.

use thiserror::Error;

/// Ways a summarization request can fail.
///
/// The service exposes no error taxonomy of its own, so callers treat every
/// variant as one "request failed" outcome; the variants exist for logs.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}s")]
    Timeout(u64),

    /// Service answered with a non-2xx status.
    #[error("Service error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Body was not the expected JSON shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The task running the request panicked or was cancelled.
    #[error("Request task failed: {0}")]
    TaskFailed(String),

    /// The HTTP client could not be constructed.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
