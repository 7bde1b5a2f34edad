//! Bounded ledger of recent submissions, newest first.

use crate::client::{SummaryResult, SummarySource};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

/// Placeholder result for a submission that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureMarker {
    pub reason: String,
}

/// How a recorded submission ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Success(SummaryResult),
    Failure(FailureMarker),
}

/// One settled submission. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Dispatch sequence number of the submission
    pub sequence: u64,
    /// What was submitted
    pub source: SummarySource,
    pub requested_at: DateTime<Utc>,
    /// Wall-clock time of the request; always zero for failures
    pub duration_seconds: f64,
    pub outcome: EntryOutcome,
}

impl HistoryEntry {
    pub fn success(
        sequence: u64,
        source: SummarySource,
        requested_at: DateTime<Utc>,
        elapsed: Duration,
        result: SummaryResult,
    ) -> Self {
        Self {
            sequence,
            source,
            requested_at,
            duration_seconds: elapsed.as_secs_f64(),
            outcome: EntryOutcome::Success(result),
        }
    }

    pub fn failure(
        sequence: u64,
        source: SummarySource,
        requested_at: DateTime<Utc>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            source,
            requested_at,
            duration_seconds: 0.0,
            outcome: EntryOutcome::Failure(FailureMarker {
                reason: reason.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, EntryOutcome::Success(_))
    }

    pub fn result(&self) -> Option<&SummaryResult> {
        match &self.outcome {
            EntryOutcome::Success(result) => Some(result),
            EntryOutcome::Failure(_) => None,
        }
    }
}

/// Ring of the last `capacity` entries. Appends go to the front; once full,
/// the oldest entry falls off the back.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLedger {
    pub const DEFAULT_CAPACITY: usize = 5;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Snapshot, newest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn failure(sequence: u64) -> HistoryEntry {
        HistoryEntry::failure(
            sequence,
            SummarySource::Text(format!("article-{}", sequence)),
            Utc::now(),
            "Service error 500",
        )
    }

    fn success(sequence: u64, secs: u64) -> HistoryEntry {
        HistoryEntry::success(
            sequence,
            SummarySource::Url(format!("http://example.com/{}", sequence)),
            Utc::now(),
            Duration::from_secs(secs),
            SummaryResult {
                formatted_input_text: "पाठ".to_string(),
                reference_summary: "सन्दर्भ".to_string(),
                hypothesis_summary: format!("summary-{}", sequence),
                score_report: None,
            },
        )
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = HistoryLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.capacity(), 5);
        assert!(ledger.latest().is_none());
    }

    #[test]
    fn test_append_inserts_at_front() {
        let mut ledger = HistoryLedger::new();
        ledger.append(success(1, 3));
        ledger.append(failure(2));

        let entries = ledger.entries();
        assert_eq!(entries[0].sequence, 2);
        assert_eq!(entries[1].sequence, 1);
        assert_eq!(ledger.latest().map(|e| e.sequence), Some(2));
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut ledger = HistoryLedger::new();
        for seq in 1..=7 {
            ledger.append(success(seq, 1));
        }

        let sequences: Vec<u64> = ledger.entries().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_failure_entry_has_zero_duration() {
        let entry = failure(1);
        assert_eq!(entry.duration_seconds, 0.0);
        assert!(!entry.is_success());
        assert!(entry.result().is_none());
    }

    #[test]
    fn test_success_entry_records_elapsed() {
        let entry = success(1, 4);
        assert_eq!(entry.duration_seconds, 4.0);
        assert_eq!(entry.result().unwrap().hypothesis_summary, "summary-1");
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut ledger = HistoryLedger::with_capacity(0);
        ledger.append(failure(1));
        ledger.append(failure(2));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.latest().unwrap().sequence, 2);
    }

    #[test]
    fn test_entry_serializes_status_tag() {
        let value = serde_json::to_value(failure(3)).unwrap();
        assert_eq!(value["outcome"]["status"], "failure");
        assert_eq!(value["outcome"]["reason"], "Service error 500");
    }

    proptest! {
        #[test]
        fn prop_ledger_keeps_five_most_recent(count in 0u64..40) {
            let mut ledger = HistoryLedger::new();
            for seq in 1..=count {
                ledger.append(failure(seq));
            }

            let expected: Vec<u64> = (1..=count).rev().take(5).collect();
            let actual: Vec<u64> = ledger.entries().iter().map(|e| e.sequence).collect();
            prop_assert_eq!(ledger.len(), count.min(5) as usize);
            prop_assert_eq!(actual, expected);
        }
    }
}
