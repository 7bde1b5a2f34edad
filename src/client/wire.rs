//! JSON shapes exchanged with the summarization service.

use super::types::{
    LengthPreference, MetricScore, ScoreReport, SummaryRequest, SummaryResult, SummarySource,
};
use super::ClientError;
use serde::{Deserialize, Serialize};

/// `{"url": ..., "selectedLength": ...}` or `{"text": ..., "selectedLength": ...}`
#[derive(Debug, Serialize)]
pub struct RequestBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(rename = "selectedLength")]
    pub selected_length: LengthPreference,
}

impl<'a> From<&'a SummaryRequest> for RequestBody<'a> {
    fn from(request: &'a SummaryRequest) -> Self {
        let (url, text) = match &request.source {
            SummarySource::Url(u) => (Some(u.as_str()), None),
            SummarySource::Text(t) => (None, Some(t.as_str())),
        };
        Self {
            url,
            text,
            selected_length: request.length,
        }
    }
}

/// 200 response body
#[derive(Debug, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub formatted_text: Option<String>,
    pub reference_summary: String,
    pub hypothesis_summary: String,
    #[serde(default)]
    pub rouge_scores: Option<WireScores>,
}

#[derive(Debug, Deserialize)]
pub struct WireScores {
    pub rouge1: WireMetric,
    pub rouge2: WireMetric,
    #[serde(rename = "rougeL")]
    pub rouge_l: WireMetric,
}

#[derive(Debug, Deserialize)]
pub struct WireMetric {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

/// Error body the service sends alongside 4xx/5xx statuses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl WireMetric {
    fn into_score(self, key: &str) -> Result<MetricScore, ClientError> {
        for (field, value) in [
            ("precision", self.precision),
            ("recall", self.recall),
            ("fmeasure", self.fmeasure),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ClientError::InvalidResponse(format!(
                    "rouge_scores.{}.{} out of range: {}",
                    key, field, value
                )));
            }
        }
        Ok(MetricScore {
            precision: self.precision,
            recall: self.recall,
            f1: self.fmeasure,
        })
    }
}

impl WireScores {
    fn into_report(self) -> Result<ScoreReport, ClientError> {
        Ok(ScoreReport {
            rouge1: self.rouge1.into_score("rouge1")?,
            rouge2: self.rouge2.into_score("rouge2")?,
            rouge_l: self.rouge_l.into_score("rougeL")?,
        })
    }
}

impl ResponseBody {
    /// Convert to the domain result. An empty `formatted_text` falls back to
    /// the text that was submitted, if any.
    pub fn into_result(self, request: &SummaryRequest) -> Result<SummaryResult, ClientError> {
        let formatted_input_text = match self.formatted_text {
            Some(text) if !text.is_empty() => text,
            _ => request.submitted_text().unwrap_or_default().to_string(),
        };
        let score_report = self.rouge_scores.map(WireScores::into_report).transpose()?;

        Ok(SummaryResult {
            formatted_input_text,
            reference_summary: self.reference_summary,
            hypothesis_summary: self.hypothesis_summary,
            score_report,
        })
    }
}
