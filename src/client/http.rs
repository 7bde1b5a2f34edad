//! reqwest-backed [`SummaryClient`].

use super::wire::{ErrorBody, RequestBody, ResponseBody};
use super::{ClientError, SummaryClient, SummaryRequest, SummaryResult};
use crate::config::ServiceConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Longest slice of an error body carried into [`ClientError::Upstream`].
const MAX_ERROR_MESSAGE_LEN: usize = 512;

/// Talks to the summarization service over HTTP.
pub struct HttpSummaryClient {
    /// Full URL requests are POSTed to
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl HttpSummaryClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        Ok(Self::with_client(endpoint, timeout, client))
    }

    /// Create a client around an existing reqwest client (for testing).
    pub fn with_client(endpoint: impl Into<String>, timeout: Duration, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            client,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ClientError> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SummaryClient for HttpSummaryClient {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, ClientError> {
        let start = Instant::now();
        tracing::debug!(
            endpoint = %self.endpoint,
            length = %request.length,
            source = if request.submitted_text().is_some() { "text" } else { "url" },
            "Sending summarization request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&RequestBody::from(request))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(self.timeout.as_secs())
                } else {
                    ClientError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            let mut message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
            if message.len() > MAX_ERROR_MESSAGE_LEN {
                let mut cut = MAX_ERROR_MESSAGE_LEN;
                while !message.is_char_boundary(cut) {
                    cut -= 1;
                }
                message.truncate(cut);
            }
            tracing::warn!(status = status.as_u16(), %message, "Summarization service returned an error");
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ResponseBody = serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to parse summary response: {}", e))
        })?;
        let result = parsed.into_result(request)?;

        tracing::info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            hypothesis_chars = result.hypothesis_summary.chars().count(),
            has_scores = result.score_report.is_some(),
            "Summary received"
        );
        Ok(result)
    }
}
