//! Submission lifecycle.
//!
//! [`SubmissionCoordinator`] admits at most one summarization request at a
//! time, drives the countdown while it is in flight, and on completion
//! updates the running average, the history ledger and the view-state in one
//! step under a single lock.
//!
//! Every dispatch carries a sequence number. A completion whose sequence does
//! not match the tracked in-flight request is discarded rather than applied
//! to the wrong submission.

mod error;
mod state;

pub use error::SubmitError;
pub use state::{CoordinatorSnapshot, Draft, SubmissionState};

use crate::client::{
    ClientError, LengthPreference, SummaryClient, SummaryRequest, SummaryResult, SummarySource,
};
use crate::config::NepsumConfig;
use crate::eta::{CountdownTimer, EtaEstimator, RunningAverage};
use crate::history::{HistoryEntry, HistoryLedger};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::{oneshot, watch};

/// Message shown to the user whenever a request fails, whatever the cause.
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to summarize. Please try again.";

/// Tuning knobs, usually taken from [`NepsumConfig`].
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub default_estimate: Duration,
    pub smoothing_factor: f64,
    pub tick_interval: Duration,
    pub history_capacity: usize,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self::from(&NepsumConfig::default())
    }
}

impl From<&NepsumConfig> for CoordinatorOptions {
    fn from(config: &NepsumConfig) -> Self {
        Self {
            default_estimate: config.eta.default_estimate(),
            smoothing_factor: config.eta.smoothing_factor,
            tick_interval: config.eta.tick_interval(),
            history_capacity: config.history.capacity,
        }
    }
}

struct InFlight {
    sequence: u64,
    source: SummarySource,
    requested_at: DateTime<Utc>,
    estimator: EtaEstimator,
    // Dropping this stops the countdown task.
    countdown: CountdownTimer,
}

struct Inner {
    state: SubmissionState,
    draft: Draft,
    last_error: Option<String>,
    average: RunningAverage,
    ledger: HistoryLedger,
    next_sequence: u64,
    in_flight: Option<InFlight>,
}

/// Handle for one dispatched submission.
#[derive(Debug)]
pub struct Ticket {
    pub sequence: u64,
    /// Countdown starting value
    pub estimate: Duration,
    countdown: watch::Receiver<Duration>,
    done: oneshot::Receiver<SubmissionState>,
}

impl Ticket {
    /// Remaining-time receiver; closes when the request settles.
    pub fn countdown(&self) -> watch::Receiver<Duration> {
        self.countdown.clone()
    }

    /// Wait for the request to settle and return the resulting state.
    pub async fn settled(self) -> SubmissionState {
        self.done.await.unwrap_or_else(|_| SubmissionState::Failed {
            reason: "request task ended before settling".to_string(),
        })
    }
}

/// Owns the submission state machine, running average and history ledger.
///
/// Shared as `Arc<SubmissionCoordinator>`; [`submit`](Self::submit) spawns
/// onto the current tokio runtime.
pub struct SubmissionCoordinator {
    client: Arc<dyn SummaryClient>,
    options: CoordinatorOptions,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<SubmissionState>,
}

impl SubmissionCoordinator {
    pub fn new(client: Arc<dyn SummaryClient>, options: CoordinatorOptions) -> Self {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);
        let inner = Inner {
            state: SubmissionState::Idle,
            draft: Draft::default(),
            last_error: None,
            average: RunningAverage::new(options.smoothing_factor),
            ledger: HistoryLedger::with_capacity(options.history_capacity),
            next_sequence: 0,
            in_flight: None,
        };
        Self {
            client,
            options,
            inner: Mutex::new(inner),
            state_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.state_tx.send_replace(inner.state.clone());
    }

    /// Dispatch `request` unless it is blank or another request is in flight.
    ///
    /// A busy rejection leaves every piece of state untouched.
    pub fn submit(self: &Arc<Self>, request: SummaryRequest) -> Result<Ticket, SubmitError> {
        let mut inner = self.lock();

        if request.is_blank() {
            tracing::debug!("Rejected blank submission");
            inner.last_error = Some(SubmitError::Validation.to_string());
            return Err(SubmitError::Validation);
        }
        if let Some(flight) = &inner.in_flight {
            tracing::debug!(
                in_flight = flight.sequence,
                "Ignoring submission while a request is in flight"
            );
            return Err(SubmitError::Busy {
                sequence: flight.sequence,
            });
        }

        inner.next_sequence += 1;
        let sequence = inner.next_sequence;
        let estimate = inner.average.estimate_or(self.options.default_estimate);
        let started = Instant::now();
        let requested_at = Utc::now();
        let estimator = EtaEstimator::start(estimate, started);
        let countdown = CountdownTimer::start(estimator.clone(), self.options.tick_interval);
        let countdown_rx = countdown.subscribe();

        inner.in_flight = Some(InFlight {
            sequence,
            source: request.source.clone(),
            requested_at,
            estimator,
            countdown,
        });
        inner.last_error = None;
        inner.state = SubmissionState::InFlight {
            sequence,
            started_at: requested_at,
            estimated_total: estimate,
        };
        self.publish(&inner);
        drop(inner);

        tracing::info!(
            sequence,
            length = %request.length,
            estimate_ms = estimate.as_millis() as u64,
            "Submission dispatched"
        );

        let (done_tx, done_rx) = oneshot::channel();
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            // The call runs in its own task so a panicking client still
            // settles this submission.
            let client = Arc::clone(&coordinator.client);
            let call = tokio::spawn(async move { client.summarize(&request).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(sequence, error = %e, "Summarization task did not complete");
                    Err(ClientError::TaskFailed(e.to_string()))
                }
            };
            if let Some(state) = coordinator.settle(sequence, outcome, started.elapsed()) {
                let _ = done_tx.send(state);
            }
        });

        Ok(Ticket {
            sequence,
            estimate,
            countdown: countdown_rx,
            done: done_rx,
        })
    }

    /// Build a request from the current draft and submit it.
    pub fn submit_draft(self: &Arc<Self>) -> Result<Ticket, SubmitError> {
        let request = {
            let mut inner = self.lock();
            let draft = &inner.draft;
            match SummaryRequest::from_inputs(&draft.url, &draft.text, draft.length) {
                Some(request) => request,
                None => {
                    inner.last_error = Some(SubmitError::Validation.to_string());
                    return Err(SubmitError::Validation);
                }
            }
        };
        self.submit(request)
    }

    /// Apply the outcome of dispatch `sequence`.
    ///
    /// Returns `false` (and changes nothing) when `sequence` is not the
    /// request currently in flight.
    pub fn on_settled(
        &self,
        sequence: u64,
        outcome: Result<SummaryResult, ClientError>,
        elapsed: Duration,
    ) -> bool {
        self.settle(sequence, outcome, elapsed).is_some()
    }

    /// Apply an outcome and return the state it produced, captured under
    /// the same lock.
    fn settle(
        &self,
        sequence: u64,
        outcome: Result<SummaryResult, ClientError>,
        elapsed: Duration,
    ) -> Option<SubmissionState> {
        let mut inner = self.lock();
        let Some(flight) = inner.in_flight.take_if(|f| f.sequence == sequence) else {
            tracing::warn!(sequence, "Discarding outcome for a request that is not in flight");
            return None;
        };
        let InFlight {
            source,
            requested_at,
            estimator,
            countdown,
            ..
        } = flight;
        drop(countdown);

        match outcome {
            Ok(result) => {
                let average = estimator.update(&mut inner.average, elapsed);
                inner.ledger.append(HistoryEntry::success(
                    sequence,
                    source,
                    requested_at,
                    elapsed,
                    result.clone(),
                ));
                // The service's cleaned article replaces the draft text
                if !result.formatted_input_text.is_empty() {
                    inner.draft.text = result.formatted_input_text.clone();
                }
                inner.state = SubmissionState::Settled(result);
                tracing::info!(
                    sequence,
                    elapsed_ms = elapsed.as_millis() as u64,
                    running_average_s = average,
                    "Submission settled"
                );
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(sequence, error = %reason, "Submission failed");
                inner.ledger.append(HistoryEntry::failure(
                    sequence,
                    source,
                    requested_at,
                    reason.clone(),
                ));
                inner.last_error = Some(REQUEST_FAILED_MESSAGE.to_string());
                inner.state = SubmissionState::Failed { reason };
            }
        }
        self.publish(&inner);
        Some(inner.state.clone())
    }

    /// Reset the draft and any error. History, the running average and an
    /// in-flight request are left alone.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.draft.url.clear();
        inner.draft.text.clear();
        inner.last_error = None;
        if matches!(inner.state, SubmissionState::Failed { .. }) {
            inner.state = SubmissionState::Idle;
            self.publish(&inner);
        }
    }

    /// Set the draft URL. Like editing the URL field, this clears the text.
    pub fn set_url(&self, url: impl Into<String>) {
        let mut inner = self.lock();
        inner.draft.url = url.into();
        inner.draft.text.clear();
        inner.last_error = None;
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.lock().draft.text = text.into();
    }

    pub fn set_length(&self, length: LengthPreference) {
        self.lock().draft.length = length;
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> CoordinatorSnapshot {
        let inner = self.lock();
        CoordinatorSnapshot {
            state: inner.state.clone(),
            draft: inner.draft.clone(),
            last_error: inner.last_error.clone(),
            running_average_seconds: inner.average.value(),
            history: inner.ledger.entries(),
        }
    }

    /// Newest first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().ledger.entries()
    }

    pub fn running_average(&self) -> Option<f64> {
        self.lock().average.value()
    }

    /// Remaining-time receiver of the in-flight request, if any.
    pub fn countdown(&self) -> Option<watch::Receiver<Duration>> {
        self.lock().in_flight.as_ref().map(|f| f.countdown.subscribe())
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight.is_some()
    }
}
