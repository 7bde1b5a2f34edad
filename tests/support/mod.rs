//! Shared helpers for nepsum integration tests.

#![allow(dead_code)]

use nepsum::client::HttpSummaryClient;
use nepsum::config::NepsumConfig;
use nepsum::coordinator::{CoordinatorOptions, SubmissionCoordinator};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Hypothesis summary returned by the canned service response
pub const HYPOTHESIS: &str = "संक्षेप";

/// Reference summary returned by the canned service response
pub const REFERENCE: &str = "नयाँ नियम लागू";

/// A well-formed 200 body with all three ROUGE metrics
pub fn summary_body() -> Value {
    json!({
        "formatted_text": "काठमाडौं महानगरपालिकाले नयाँ नियम ल्यायो",
        "reference_summary": REFERENCE,
        "hypothesis_summary": HYPOTHESIS,
        "rouge_scores": {
            "rouge1": { "precision": 0.8, "recall": 0.7, "fmeasure": 0.75 },
            "rouge2": { "precision": 0.5, "recall": 0.4, "fmeasure": 0.44 },
            "rougeL": { "precision": 0.6, "recall": 0.6, "fmeasure": 0.6 }
        }
    })
}

/// Config pointing at a mock server, with a fast countdown tick
pub fn config_for(endpoint: &str) -> NepsumConfig {
    let mut config = NepsumConfig::default();
    config.service.endpoint = endpoint.to_string();
    config.service.request_timeout_seconds = 5;
    config.eta.tick_interval_ms = 20;
    config
}

/// Coordinator backed by a real HTTP client
pub fn http_coordinator(endpoint: &str, timeout: Duration) -> Arc<SubmissionCoordinator> {
    let client = HttpSummaryClient::new(endpoint, timeout).unwrap();
    let options = CoordinatorOptions {
        tick_interval: Duration::from_millis(20),
        ..CoordinatorOptions::default()
    };
    Arc::new(SubmissionCoordinator::new(Arc::new(client), options))
}
