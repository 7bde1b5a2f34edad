//! View-state types exposed by the coordinator.

use crate::client::{LengthPreference, SummaryResult};
use crate::history::HistoryEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Lifecycle of the current submission.
///
/// `Settled` and `Failed` accept new submissions exactly like `Idle`.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight {
        sequence: u64,
        started_at: DateTime<Utc>,
        estimated_total: Duration,
    },
    Settled(SummaryResult),
    Failed {
        reason: String,
    },
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::InFlight { .. } => "in-flight",
            SubmissionState::Settled(_) => "settled",
            SubmissionState::Failed { .. } => "failed",
        }
    }
}

/// Form inputs not yet submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub url: String,
    pub text: String,
    pub length: LengthPreference,
}

/// Owned, read-only copy of everything the presentation layer may show.
#[derive(Debug, Clone, Serialize)]
pub struct CoordinatorSnapshot {
    pub state: SubmissionState,
    pub draft: Draft,
    /// Message for the most recent rejected or failed submission
    pub last_error: Option<String>,
    pub running_average_seconds: Option<f64>,
    /// Newest first
    pub history: Vec<HistoryEntry>,
}
