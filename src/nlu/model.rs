//! Data model of the external language-understanding services, and the
//! call contracts the turn pipeline depends on.

use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;

/// Result of one recognizer call. Opaque except for the top-intent label
/// and the two provider sub-results the handlers know how to read.
#[derive(Debug, Clone)]
pub struct RecognizerResult {
    pub top_intent: String,
    /// Provider-keyed sub-results; see [`HOME_AUTOMATION_PROVIDER`] and
    /// [`WEATHER_PROVIDER`].
    pub sub_results: HashMap<String, IntentSummary>,
    /// The provider payload as received, untouched.
    pub raw: serde_json::Value,
}

/// Provider key of the home-automation sub-result.
pub const HOME_AUTOMATION_PROVIDER: &str = "homeAutomation";
/// Provider key of the weather sub-result.
pub const WEATHER_PROVIDER: &str = "weather";

impl RecognizerResult {
    /// Sub-result for `provider`, or an empty summary when the provider
    /// contributed nothing to this result.
    #[must_use]
    pub fn sub_result(&self, provider: &str) -> IntentSummary {
        self.sub_results.get(provider).cloned().unwrap_or_default()
    }
}

/// Ranked sub-intents and extracted entities from one connected provider.
#[derive(Debug, Clone, Default)]
pub struct IntentSummary {
    /// Candidate intents in provider order, best first. No re-ranking.
    pub intents: Vec<ScoredIntent>,
    pub entities: Vec<Entity>,
}

impl IntentSummary {
    /// Label of the top-scoring candidate, `"None"` when the provider
    /// returned no candidates.
    #[must_use]
    pub fn top_intent(&self) -> &str {
        self.intents.first().map_or("None", |scored| scored.intent.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ScoredIntent {
    pub intent: String,
    pub score: f64,
}

/// A structured value the recognizer extracted from the utterance, e.g.
/// a place or a time.
#[derive(Debug, Clone)]
pub struct Entity {
    pub value: String,
    pub category: String,
}

/// One knowledge-base answer; `score` is the provider's confidence.
#[derive(Debug, Clone)]
pub struct RankedAnswer {
    pub answer: String,
    pub score: f64,
}

/// The dispatchable intent set. Decided exactly once from the
/// recognizer's label, so handler selection is exhaustively checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    HomeAutomation,
    Weather,
    SampleQna,
    Unknown(String),
}

impl Intent {
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "l_HomeAutomation" => Self::HomeAutomation,
            "l_Weather" => Self::Weather,
            "q_sample-qna" => Self::SampleQna,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("no intent recognizer is configured")]
    NotConfigured,
    #[error("the intent recognizer call failed: {0}")]
    Remote(String),
    #[error("the intent recognizer returned an unusable payload: {0}")]
    Payload(String),
}

#[derive(Debug, Error)]
pub enum QnaError {
    #[error("no knowledge base is configured")]
    NotConfigured,
    #[error("the knowledge base call failed: {0}")]
    Remote(String),
    #[error("the knowledge base returned an unusable payload: {0}")]
    Payload(String),
}

pub trait IntentRecognizer: Send + Sync {
    fn recognize(
        &self,
        utterance: &str,
    ) -> impl Future<Output = Result<RecognizerResult, RecognitionError>> + Send;
}

pub trait QnaSource: Send + Sync {
    fn answers(
        &self,
        utterance: &str,
    ) -> impl Future<Output = Result<Vec<RankedAnswer>, QnaError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_their_variants() {
        assert_eq!(Intent::from_label("l_HomeAutomation"), Intent::HomeAutomation);
        assert_eq!(Intent::from_label("l_Weather"), Intent::Weather);
        assert_eq!(Intent::from_label("q_sample-qna"), Intent::SampleQna);
    }

    #[test]
    fn every_other_label_is_unknown_and_keeps_its_name() {
        assert_eq!(Intent::from_label("l_Foo"), Intent::Unknown("l_Foo".to_owned()));
        assert_eq!(Intent::from_label(""), Intent::Unknown(String::new()));
        // Labels are matched verbatim; casing matters.
        assert_eq!(Intent::from_label("l_weather"), Intent::Unknown("l_weather".to_owned()));
    }

    #[test]
    fn empty_summary_reports_none_as_top_intent() {
        assert_eq!(IntentSummary::default().top_intent(), "None");
    }
}
