//! Request and result types shared by the client, coordinator and CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Summary length requested from the service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LengthPreference {
    /// Single-pass summary of the whole article
    #[default]
    Short,
    /// Chunked summary, one pass per group of sentences
    Long,
}

impl LengthPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthPreference::Short => "short",
            LengthPreference::Long => "long",
        }
    }
}

impl fmt::Display for LengthPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(LengthPreference::Short),
            "long" => Ok(LengthPreference::Long),
            _ => Err(format!("Invalid summary length: {}", s)),
        }
    }
}

/// What the article is: a link for the service to fetch, or the text itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    Url(String),
    Text(String),
}

impl SummarySource {
    pub fn is_blank(&self) -> bool {
        match self {
            SummarySource::Url(s) | SummarySource::Text(s) => s.trim().is_empty(),
        }
    }
}

/// One summarization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    pub source: SummarySource,
    pub length: LengthPreference,
}

impl SummaryRequest {
    pub fn url(url: impl Into<String>, length: LengthPreference) -> Self {
        Self {
            source: SummarySource::Url(url.into()),
            length,
        }
    }

    pub fn text(text: impl Into<String>, length: LengthPreference) -> Self {
        Self {
            source: SummarySource::Text(text.into()),
            length,
        }
    }

    /// Build a request from the two form inputs. A non-blank URL wins over
    /// text; `None` when both are blank.
    pub fn from_inputs(url: &str, text: &str, length: LengthPreference) -> Option<Self> {
        if !url.trim().is_empty() {
            Some(Self::url(url.trim(), length))
        } else if !text.trim().is_empty() {
            Some(Self::text(text, length))
        } else {
            None
        }
    }

    pub fn is_blank(&self) -> bool {
        self.source.is_blank()
    }

    /// The pasted text, if this request carries text rather than a URL.
    pub fn submitted_text(&self) -> Option<&str> {
        match &self.source {
            SummarySource::Text(t) => Some(t),
            SummarySource::Url(_) => None,
        }
    }
}

/// Names of the ROUGE metrics reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetricName {
    #[serde(rename = "rouge1")]
    Rouge1,
    #[serde(rename = "rouge2")]
    Rouge2,
    #[serde(rename = "rougeL")]
    RougeL,
}

impl MetricName {
    pub const ALL: [MetricName; 3] = [MetricName::Rouge1, MetricName::Rouge2, MetricName::RougeL];

    /// Key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            MetricName::Rouge1 => "rouge1",
            MetricName::Rouge2 => "rouge2",
            MetricName::RougeL => "rougeL",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            MetricName::Rouge1 => "ROUGE-1",
            MetricName::Rouge2 => "ROUGE-2",
            MetricName::RougeL => "ROUGE-L",
        }
    }
}

/// Precision, recall and F1 for one metric, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// All three ROUGE metrics. There is no partial report: either the service
/// returned every metric or the result carries no report at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub rouge1: MetricScore,
    pub rouge2: MetricScore,
    #[serde(rename = "rougeL")]
    pub rouge_l: MetricScore,
}

impl ScoreReport {
    pub fn get(&self, name: MetricName) -> &MetricScore {
        match name {
            MetricName::Rouge1 => &self.rouge1,
            MetricName::Rouge2 => &self.rouge2,
            MetricName::RougeL => &self.rouge_l,
        }
    }

    /// Metrics in display order
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, &MetricScore)> {
        MetricName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}

/// A successful summarization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    /// Article text as cleaned up by the service
    pub formatted_input_text: String,
    /// Reference summary used as scoring ground truth
    pub reference_summary: String,
    /// Summary produced by the model under evaluation
    pub hypothesis_summary: String,
    pub score_report: Option<ScoreReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_inputs_prefers_url() {
        let req = SummaryRequest::from_inputs(
            " http://example.com/a ",
            "some text",
            LengthPreference::Long,
        )
        .unwrap();
        assert_eq!(req.source, SummarySource::Url("http://example.com/a".into()));
        assert_eq!(req.length, LengthPreference::Long);
    }

    #[test]
    fn test_from_inputs_falls_back_to_text() {
        let req = SummaryRequest::from_inputs("  ", "समाचार", LengthPreference::Short).unwrap();
        assert_eq!(req.submitted_text(), Some("समाचार"));
    }

    #[test]
    fn test_from_inputs_both_blank() {
        assert!(SummaryRequest::from_inputs("", " \n\t", LengthPreference::Short).is_none());
    }

    #[test]
    fn test_blank_source_detection() {
        assert!(SummaryRequest::url("   ", LengthPreference::Short).is_blank());
        assert!(!SummaryRequest::text("x", LengthPreference::Short).is_blank());
    }

    #[test]
    fn test_length_preference_parse_and_display() {
        assert_eq!("LONG".parse::<LengthPreference>().unwrap(), LengthPreference::Long);
        assert!("medium".parse::<LengthPreference>().is_err());
        assert_eq!(LengthPreference::Short.to_string(), "short");
    }

    #[test]
    fn test_score_report_iter_order() {
        let m = |v| MetricScore {
            precision: v,
            recall: v,
            f1: v,
        };
        let report = ScoreReport {
            rouge1: m(0.1),
            rouge2: m(0.2),
            rouge_l: m(0.3),
        };
        let labels: Vec<_> = report.iter().map(|(n, _)| n.label()).collect();
        assert_eq!(labels, vec!["ROUGE-1", "ROUGE-2", "ROUGE-L"]);
        assert_eq!(report.get(MetricName::RougeL).f1, 0.3);
    }

    #[test]
    fn test_score_report_serializes_wire_keys() {
        let m = MetricScore {
            precision: 0.5,
            recall: 0.5,
            f1: 0.5,
        };
        let report = ScoreReport {
            rouge1: m,
            rouge2: m,
            rouge_l: m,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("rougeL").is_some());
        assert!(value.get("rouge_l").is_none());
    }
}
