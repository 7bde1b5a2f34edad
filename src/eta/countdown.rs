//! Periodic countdown publisher tied to the lifetime of a handle.

use super::EtaEstimator;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Background task that republishes an [`EtaEstimator`]'s remaining time
/// every `interval`.
///
/// The task runs exactly as long as this handle lives: dropping it cancels
/// the task, so holding it in the in-flight state and dropping it on settle
/// is enough to stop the timer.
pub struct CountdownTimer {
    remaining: watch::Receiver<Duration>,
    handle: JoinHandle<()>,
    _guard: DropGuard,
}

impl CountdownTimer {
    /// Spawn the countdown task. Must be called from within a tokio runtime.
    pub fn start(estimator: EtaEstimator, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(estimator.estimate());
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut estimator = estimator;
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => {
                        tracing::trace!("Countdown stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let remaining = estimator.tick(Instant::now());
                        tx.send_if_modified(|current| {
                            if *current != remaining {
                                *current = remaining;
                                true
                            } else {
                                false
                            }
                        });
                    }
                }
            }
        });

        Self {
            remaining: rx,
            handle,
            _guard: token.drop_guard(),
        }
    }

    /// Receiver of the remaining estimate. Reports closed once the timer stops.
    pub fn subscribe(&self) -> watch::Receiver<Duration> {
        self.remaining.clone()
    }

    pub fn remaining(&self) -> Duration {
        *self.remaining.borrow()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("remaining", &self.remaining())
            .field("running", &self.is_running())
            .finish()
    }
}
