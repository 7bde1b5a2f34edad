//! Summarization service client.
//!
//! The service is a single endpoint: POST a URL or an article body with a
//! length preference, get back the cleaned-up article, a reference summary,
//! the model's summary and ROUGE scores between the two. Everything behind
//! that endpoint is opaque to this crate.

use async_trait::async_trait;

pub mod error;
pub mod http;
pub mod types;
pub mod wire;

pub use error::ClientError;
pub use http::HttpSummaryClient;
pub use types::{
    LengthPreference, MetricName, MetricScore, ScoreReport, SummaryRequest, SummaryResult,
    SummarySource,
};

/// Anything that can turn a [`SummaryRequest`] into a [`SummaryResult`].
///
/// The coordinator holds this as `Arc<dyn SummaryClient>` so tests can swap
/// in an in-process fake.
///
/// # Cancellation Safety
///
/// Dropping the returned future aborts the HTTP request, but the coordinator
/// never does so: every dispatched request runs to completion.
#[async_trait]
pub trait SummaryClient: Send + Sync + 'static {
    /// Perform one summarization round-trip.
    ///
    /// # Returns
    ///
    /// - `Ok(SummaryResult)` on a 2xx response with a well-formed body
    /// - `Err(ClientError::Upstream)` on any non-2xx status
    /// - `Err(ClientError::Network)` / `Err(ClientError::Timeout)` on transport failure
    /// - `Err(ClientError::InvalidResponse)` if the body doesn't parse
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, ClientError>;
}
