//! Summarize command implementation

use crate::cli::output::{format_countdown, format_result, format_result_json};
use crate::cli::setup::build_coordinator;
use crate::cli::SummarizeArgs;
use crate::config::NepsumConfig;
use crate::coordinator::{SubmissionState, REQUEST_FAILED_MESSAGE};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Read article text from a file, or from stdin when the path is "-"
pub fn read_article(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Spinner on stderr showing the countdown until the receiver closes.
/// Hidden automatically when stderr is not a terminal.
fn show_countdown(mut remaining: watch::Receiver<Duration>) -> (ProgressBar, JoinHandle<()>) {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} Processing... {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_message(format_countdown(*remaining.borrow()));

    let display = bar.clone();
    let handle = tokio::spawn(async move {
        while remaining.changed().await.is_ok() {
            let value = *remaining.borrow_and_update();
            display.set_message(format_countdown(value));
        }
    });
    (bar, handle)
}

/// Handle `nepsum summarize`: one submission, rendered once it settles
pub async fn run_summarize(
    args: &SummarizeArgs,
    config: &NepsumConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let text = match &args.file {
        Some(path) => Some(read_article(path).map_err(|e| {
            format!("Failed to read {}: {}", path.display(), e)
        })?),
        None => args.text.clone(),
    };

    let coordinator = build_coordinator(config)?;
    if let Some(ref url) = args.url {
        coordinator.set_url(url.clone());
    }
    if let Some(text) = text {
        coordinator.set_text(text);
    }
    coordinator.set_length(args.length.unwrap_or(config.service.default_length));

    let ticket = coordinator.submit_draft()?;
    let (bar, progress) = show_countdown(ticket.countdown());
    let state = ticket.settled().await;
    bar.finish_and_clear();
    progress.abort();

    match state {
        SubmissionState::Settled(result) => {
            let duration = coordinator.history().first().map(|e| e.duration_seconds);
            if args.json {
                Ok(format_result_json(&result, duration)?)
            } else {
                Ok(format_result(&result))
            }
        }
        SubmissionState::Failed { reason } => {
            Err(format!("{} ({})", REQUEST_FAILED_MESSAGE, reason).into())
        }
        other => Err(format!("Submission ended in unexpected state: {}", other.label()).into()),
    }
}
