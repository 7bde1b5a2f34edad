//! Output formatting helpers for CLI commands

use crate::client::{ScoreReport, SummaryResult, SummarySource};
use crate::coordinator::{CoordinatorSnapshot, SubmissionState};
use crate::history::{EntryOutcome, HistoryEntry};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;
use std::time::Duration;

/// Characters of the input shown per history row
pub const INPUT_PREVIEW_CHARS: usize = 100;

/// Whitespace-separated word count
pub fn count_words(s: &str) -> usize {
    s.split_whitespace().count()
}

/// First `max_chars` characters, with an ellipsis when cut
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Score with four decimals
pub fn format_score(value: f64) -> String {
    format!("{:.4}", value)
}

pub fn format_countdown(remaining: Duration) -> String {
    if remaining.is_zero() {
        "almost done...".to_string()
    } else {
        format!("~{:.1}s remaining", remaining.as_secs_f64())
    }
}

/// Format the ROUGE scores as a table
pub fn format_scores_table(report: &ScoreReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Precision", "Recall", "F1 Score"]);

    for (name, score) in report.iter() {
        table.add_row(vec![
            Cell::new(name.label()),
            Cell::new(format_score(score.precision)),
            Cell::new(format_score(score.recall)),
            Cell::new(format_score(score.f1)),
        ]);
    }

    table.to_string()
}

/// Format a successful result: the article as the service read it, both
/// summaries, their word counts and scores
pub fn format_result(result: &SummaryResult) -> String {
    let mut out = String::new();

    if !result.formatted_input_text.is_empty() {
        out.push_str(&format!("{}\n", "Input Text".bold().underline()));
        out.push_str(&result.formatted_input_text);
        out.push_str(&format!(
            "\n{}\n\n",
            format!("Word Count: {}", count_words(&result.formatted_input_text)).dimmed()
        ));
    }

    if !result.reference_summary.is_empty() {
        out.push_str(&format!("{}\n", "Reference Summary".bold().underline()));
        out.push_str(&result.reference_summary);
        out.push_str(&format!(
            "\n{}\n\n",
            format!("Word Count: {}", count_words(&result.reference_summary)).dimmed()
        ));
    }

    if !result.hypothesis_summary.is_empty() {
        out.push_str(&format!("{}\n", "mT5 Summary".bold().underline()));
        out.push_str(&result.hypothesis_summary);
        out.push_str(&format!(
            "\n{}\n\n",
            format!("Word Count: {}", count_words(&result.hypothesis_summary)).dimmed()
        ));
    }

    match &result.score_report {
        Some(report) => {
            out.push_str(&format!("{}\n", "ROUGE Scores".bold().underline()));
            out.push_str(&format_scores_table(report));
        }
        None => out.push_str(&"No ROUGE scores returned".yellow().to_string()),
    }

    out
}

/// Format a successful result as JSON
pub fn format_result_json(
    result: &SummaryResult,
    duration_seconds: Option<f64>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "formatted_text": result.formatted_input_text,
        "reference_summary": result.reference_summary,
        "hypothesis_summary": result.hypothesis_summary,
        "rouge_scores": result.score_report,
        "word_counts": {
            "input": count_words(&result.formatted_input_text),
            "reference": count_words(&result.reference_summary),
            "hypothesis": count_words(&result.hypothesis_summary),
        },
        "duration_seconds": duration_seconds,
    }))
}

fn entry_input(entry: &HistoryEntry) -> String {
    match (&entry.outcome, &entry.source) {
        (EntryOutcome::Success(result), _) if !result.formatted_input_text.is_empty() => {
            preview(&result.formatted_input_text, INPUT_PREVIEW_CHARS)
        }
        (_, SummarySource::Url(url)) => url.clone(),
        (_, SummarySource::Text(text)) => preview(text, INPUT_PREVIEW_CHARS),
    }
}

/// Format recent submissions as a table, newest first
pub fn format_history_table(entries: &[HistoryEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Time", "Input", "mT5 Summary", "Duration", "Status"]);

    for entry in entries {
        let (summary, status) = match &entry.outcome {
            EntryOutcome::Success(result) => (
                result.hypothesis_summary.clone(),
                "Success".green().to_string(),
            ),
            EntryOutcome::Failure(marker) => (marker.reason.clone(), "Failed".red().to_string()),
        };

        table.add_row(vec![
            Cell::new(entry.sequence),
            Cell::new(
                entry
                    .requested_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S"),
            ),
            Cell::new(entry_input(entry)),
            Cell::new(summary),
            Cell::new(format!("{:.1}s", entry.duration_seconds)),
            Cell::new(status),
        ]);
    }

    table.to_string()
}

/// Format recent submissions as JSON
pub fn format_history_json(entries: &[HistoryEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "history": entries }))
}

/// One-line description of the current state
pub fn format_state(state: &SubmissionState) -> String {
    match state {
        SubmissionState::Idle => "Idle".to_string(),
        SubmissionState::InFlight {
            sequence,
            estimated_total,
            ..
        } => format!(
            "{} request #{} (estimated {:.1}s)",
            "Processing".cyan(),
            sequence,
            estimated_total.as_secs_f64()
        ),
        SubmissionState::Settled(result) => format!(
            "{} ({} words)",
            "Summary ready".green(),
            count_words(&result.hypothesis_summary)
        ),
        SubmissionState::Failed { reason } => format!("{}: {}", "Failed".red(), reason),
    }
}

/// Multi-line status report for the interactive session
pub fn format_status(snapshot: &CoordinatorSnapshot, remaining: Option<Duration>) -> String {
    let mut lines = vec![format!("State:    {}", format_state(&snapshot.state))];
    if let Some(remaining) = remaining {
        lines.push(format!("ETA:      {}", format_countdown(remaining)));
    }

    let draft = &snapshot.draft;
    lines.push(format!("Length:   {}", draft.length));
    if !draft.url.is_empty() {
        lines.push(format!("URL:      {}", draft.url));
    }
    if !draft.text.is_empty() {
        lines.push(format!(
            "Text:     {} (Word Count: {})",
            preview(&draft.text, 40),
            count_words(&draft.text)
        ));
    }
    if let Some(avg) = snapshot.running_average_seconds {
        lines.push(format!("Average:  {:.1}s", avg));
    }
    lines.push(format!("History:  {} entries", snapshot.history.len()));
    if let Some(ref error) = snapshot.last_error {
        lines.push(format!("{}", error.red()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MetricScore;
    use chrono::Utc;

    fn report() -> ScoreReport {
        ScoreReport {
            rouge1: MetricScore {
                precision: 0.8,
                recall: 0.7,
                f1: 0.75,
            },
            rouge2: MetricScore {
                precision: 0.5,
                recall: 0.25,
                f1: 1.0 / 3.0,
            },
            rouge_l: MetricScore {
                precision: 0.6,
                recall: 0.6,
                f1: 0.6,
            },
        }
    }

    fn result() -> SummaryResult {
        SummaryResult {
            formatted_input_text: "काठमाडौं महानगरपालिकाले नयाँ नियम ल्यायो".to_string(),
            reference_summary: "नयाँ नियम लागू".to_string(),
            hypothesis_summary: "संक्षेप".to_string(),
            score_report: Some(report()),
        }
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  नेपाल   समाचार\nआज "), 3);
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        let text = "क".repeat(150);
        let cut = preview(&text, INPUT_PREVIEW_CHARS);
        assert_eq!(cut.chars().count(), INPUT_PREVIEW_CHARS + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(preview("छोटो", 100), "छोटो");
    }

    #[test]
    fn test_scores_table_has_labels_and_four_decimals() {
        let output = format_scores_table(&report());
        assert!(output.contains("ROUGE-1"));
        assert!(output.contains("ROUGE-2"));
        assert!(output.contains("ROUGE-L"));
        assert!(output.contains("0.7500"));
        assert!(output.contains("0.3333"));
        assert!(output.contains("F1 Score"));
    }

    #[test]
    fn test_format_result_includes_summaries() {
        let output = format_result(&result());
        assert!(output.contains("संक्षेप"));
        assert!(output.contains("नयाँ नियम लागू"));
        assert!(output.contains("Word Count: 3"));
    }

    #[test]
    fn test_format_result_shows_input_text_first() {
        let output = format_result(&result());
        let input_at = output.find("काठमाडौं महानगरपालिकाले नयाँ नियम ल्यायो").unwrap();
        let summary_at = output.find("संक्षेप").unwrap();
        assert!(input_at < summary_at);
        assert!(output.contains("Input Text"));
        assert!(output.contains("Word Count: 5"));
    }

    #[test]
    fn test_format_result_without_scores() {
        let mut r = result();
        r.score_report = None;
        assert!(format_result(&r).contains("No ROUGE scores"));
    }

    #[test]
    fn test_result_json_valid() {
        let output = format_result_json(&result(), Some(2.5)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["hypothesis_summary"], "संक्षेप");
        assert_eq!(parsed["rouge_scores"]["rouge1"]["f1"], 0.75);
        assert_eq!(parsed["word_counts"]["reference"], 3);
        assert_eq!(parsed["duration_seconds"], 2.5);
    }

    #[test]
    fn test_history_table_rows() {
        let entries = vec![
            HistoryEntry::failure(
                2,
                SummarySource::Url("http://example.com/b".to_string()),
                Utc::now(),
                "Service error 500: boom",
            ),
            HistoryEntry::success(
                1,
                SummarySource::Text("पाठ".to_string()),
                Utc::now(),
                Duration::from_millis(3200),
                result(),
            ),
        ];
        let output = format_history_table(&entries);
        assert!(output.contains("http://example.com/b"));
        assert!(output.contains("Failed"));
        assert!(output.contains("3.2s"));
        assert!(output.contains("0.0s"));
    }

    #[test]
    fn test_history_json_valid() {
        let output = format_history_json(&[]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["history"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(Duration::from_millis(4300)), "~4.3s remaining");
        assert_eq!(format_countdown(Duration::ZERO), "almost done...");
    }

    #[test]
    fn test_format_state_failed() {
        let output = format_state(&SubmissionState::Failed {
            reason: "Network error: refused".to_string(),
        });
        assert!(output.contains("Network error: refused"));
    }
}
