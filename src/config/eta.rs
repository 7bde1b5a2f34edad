//! Countdown estimate configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest accepted `default_estimate_seconds` (one day).
pub const MAX_ESTIMATE_SECONDS: f64 = 86_400.0;

/// Tuning for the in-flight countdown.
///
/// # Example
///
/// ```toml
/// [eta]
/// default_estimate_seconds = 5.0
/// smoothing_factor = 0.3
/// tick_interval_ms = 100
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EtaConfig {
    /// Estimate used before any request has completed successfully.
    pub default_estimate_seconds: f64,

    /// Weight given to the newest sample: `avg = avg * (1 - f) + sample * f`.
    pub smoothing_factor: f64,

    /// How often the countdown is republished while a request is in flight.
    pub tick_interval_ms: u64,
}

impl Default for EtaConfig {
    fn default() -> Self {
        Self {
            default_estimate_seconds: 5.0,
            smoothing_factor: 0.3,
            tick_interval_ms: 100,
        }
    }
}

impl EtaConfig {
    pub fn default_estimate(&self) -> Duration {
        Duration::try_from_secs_f64(self.default_estimate_seconds.clamp(0.0, MAX_ESTIMATE_SECONDS))
            .unwrap_or(Duration::ZERO)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
