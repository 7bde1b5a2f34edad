//! Interactive session command
//!
//! Reads one command per line from stdin. Submissions run in the background
//! so `status` and `history` stay usable while a summary is being produced,
//! and a second `submit` during that time is reported as busy.

use crate::cli::output::{
    count_words, format_history_json, format_history_table, format_result, format_status,
};
use crate::cli::setup::build_coordinator;
use crate::cli::SessionArgs;
use crate::client::LengthPreference;
use crate::config::NepsumConfig;
use crate::coordinator::{SubmissionCoordinator, SubmissionState, SubmitError, REQUEST_FAILED_MESSAGE};
use colored::Colorize;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const HELP: &str = "\
Commands:
  url <URL>              set the article URL (clears any text)
  text <TEXT>            set the article text
  text                   paste multi-line text, end with a line containing only '.'
  length short|long      choose the summary length
  submit                 summarize the current input
  status                 show the current state and countdown
  history [--json]       show recent results
  clear                  clear the input and any error
  help                   show this message
  quit                   leave the session";

/// One line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Url(String),
    /// `None` starts multi-line paste mode
    Text(Option<String>),
    Length(LengthPreference),
    Submit,
    Status,
    History { json: bool },
    Clear,
    Help,
    Quit,
    Empty,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "" => Ok(SessionCommand::Empty),
            "url" => Ok(SessionCommand::Url(rest.to_string())),
            "text" if rest.is_empty() => Ok(SessionCommand::Text(None)),
            "text" => Ok(SessionCommand::Text(Some(rest.to_string()))),
            "length" => rest.parse().map(SessionCommand::Length),
            "submit" | "s" => Ok(SessionCommand::Submit),
            "status" => Ok(SessionCommand::Status),
            "history" => Ok(SessionCommand::History {
                json: rest == "--json",
            }),
            "clear" => Ok(SessionCommand::Clear),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(format!(
                "Unknown command: {}. Type 'help' for commands.",
                other
            )),
        }
    }
}

/// Apply one command and return what to print, if anything.
///
/// Each accepted submission reports its settled state on `settled`, so every
/// result is rendered even when the next request starts right away.
pub fn execute(
    coordinator: &Arc<SubmissionCoordinator>,
    command: SessionCommand,
    settled: &mpsc::UnboundedSender<SubmissionState>,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let output = match command {
        SessionCommand::Url(url) => {
            coordinator.set_url(url);
            Some("URL set".to_string())
        }
        SessionCommand::Text(Some(text)) => {
            let words = count_words(&text);
            coordinator.set_text(text);
            Some(format!("Text set ({} words)", words))
        }
        SessionCommand::Text(None) | SessionCommand::Empty | SessionCommand::Quit => None,
        SessionCommand::Length(length) => {
            coordinator.set_length(length);
            Some(format!("Length set to {}", length))
        }
        SessionCommand::Submit => match coordinator.submit_draft() {
            Ok(ticket) => {
                let message = format!(
                    "Submitted request #{} (estimated {:.1}s)",
                    ticket.sequence,
                    ticket.estimate.as_secs_f64()
                );
                let settled = settled.clone();
                tokio::spawn(async move {
                    let _ = settled.send(ticket.settled().await);
                });
                Some(message)
            }
            Err(e @ SubmitError::Busy { .. }) => Some(e.to_string().yellow().to_string()),
            Err(e @ SubmitError::Validation) => Some(e.to_string().red().to_string()),
        },
        SessionCommand::Status => {
            let remaining = coordinator.countdown().map(|rx| *rx.borrow());
            Some(format_status(&coordinator.snapshot(), remaining))
        }
        SessionCommand::History { json } => {
            let entries = coordinator.history();
            if json {
                Some(format_history_json(&entries)?)
            } else if entries.is_empty() {
                Some("No summaries yet".to_string())
            } else {
                Some(format_history_table(&entries))
            }
        }
        SessionCommand::Clear => {
            coordinator.clear();
            Some("Cleared".to_string())
        }
        SessionCommand::Help => Some(HELP.to_string()),
    };
    Ok(output)
}

fn render_transition(state: &SubmissionState) -> Option<String> {
    match state {
        SubmissionState::Settled(result) => Some(format_result(result)),
        SubmissionState::Failed { reason } => Some(format!(
            "{} ({})",
            REQUEST_FAILED_MESSAGE.red(),
            reason
        )),
        SubmissionState::Idle | SubmissionState::InFlight { .. } => None,
    }
}

fn print_transition(state: &SubmissionState) {
    if let Some(output) = render_transition(state) {
        println!("{}", output);
    }
}

/// Handle `nepsum session`
pub async fn run_session(
    args: &SessionArgs,
    config: &NepsumConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = build_coordinator(config)?;
    coordinator.set_length(args.length.unwrap_or(config.service.default_length));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel();
    let mut paste: Option<String> = None;

    println!("nepsum session ({}). Type 'help' for commands.", config.service.endpoint);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                if let Some(buffer) = paste.as_mut() {
                    if line.trim() == "." {
                        let text = paste.take().unwrap_or_default();
                        let words = count_words(&text);
                        coordinator.set_text(text);
                        println!("Text set ({} words)", words);
                    } else {
                        buffer.push_str(&line);
                        buffer.push('\n');
                    }
                    continue;
                }

                match line.parse::<SessionCommand>() {
                    Ok(SessionCommand::Quit) => break,
                    Ok(SessionCommand::Text(None)) => {
                        paste = Some(String::new());
                        println!("Paste the article, then a line with a single '.'");
                    }
                    Ok(command) => {
                        if let Some(output) = execute(&coordinator, command, &settled_tx)? {
                            println!("{}", output);
                        }
                    }
                    Err(message) => eprintln!("{}", message),
                }
            }
            Some(state) = settled_rx.recv() => print_transition(&state),
        }
    }

    // Wait for requests still in flight so their results are not lost
    drop(settled_tx);
    while let Some(state) = settled_rx.recv().await {
        print_transition(&state);
    }

    tracing::debug!(entries = coordinator.history().len(), "Session ended");
    Ok(())
}
