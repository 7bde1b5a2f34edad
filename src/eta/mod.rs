//! Processing-time estimation.
//!
//! A [`RunningAverage`] of past successful durations seeds an
//! [`EtaEstimator`] each time a request is dispatched; while the request is
//! in flight a [`CountdownTimer`] republishes the remaining estimate.

mod countdown;

pub use countdown::CountdownTimer;

use std::time::{Duration, Instant};

/// Exponentially smoothed duration, in seconds.
///
/// Undefined until the first sample; after that
/// `avg = avg * (1 - smoothing) + sample * smoothing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningAverage {
    value: Option<f64>,
    smoothing: f64,
}

impl RunningAverage {
    pub fn new(smoothing: f64) -> Self {
        Self {
            value: None,
            smoothing: smoothing.clamp(f64::MIN_POSITIVE, 1.0),
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Fold a new sample in and return the updated average.
    pub fn record(&mut self, sample_seconds: f64) -> f64 {
        let sample = if sample_seconds.is_finite() {
            sample_seconds.max(0.0)
        } else {
            0.0
        };
        let next = match self.value {
            None => sample,
            Some(prev) => prev * (1.0 - self.smoothing) + sample * self.smoothing,
        };
        self.value = Some(next);
        next
    }

    /// The average as a duration, or `default` before the first sample.
    pub fn estimate_or(&self, default: Duration) -> Duration {
        self.value
            .and_then(|v| Duration::try_from_secs_f64(v).ok())
            .unwrap_or(default)
    }
}

impl Default for RunningAverage {
    fn default() -> Self {
        Self::new(0.3)
    }
}

/// Countdown for one in-flight request.
///
/// Remaining time is always derived from the start instant, never
/// accumulated tick by tick, so a late or skipped tick cannot introduce drift.
#[derive(Debug, Clone)]
pub struct EtaEstimator {
    started_at: Instant,
    estimate: Duration,
    last: Duration,
}

impl EtaEstimator {
    pub fn start(estimate: Duration, now: Instant) -> Self {
        Self {
            started_at: now,
            estimate,
            last: estimate,
        }
    }

    /// Remaining time at `now`, clamped at zero. Never larger than the value
    /// returned by a previous tick.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.started_at);
        let remaining = self.estimate.saturating_sub(elapsed);
        self.last = self.last.min(remaining);
        self.last
    }

    pub fn estimate(&self) -> Duration {
        self.estimate
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Fold the actual duration of a completed request into the caller's
    /// running average.
    pub fn update(&self, average: &mut RunningAverage, actual: Duration) -> f64 {
        average.record(actual.as_secs_f64())
    }
}
