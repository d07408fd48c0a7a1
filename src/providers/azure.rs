//! Azure Cognitive Services clients: the language-understanding app
//! behind the recognizer, the text translator, and the knowledge base.

use reqwest::Client as ReqwestClient;

use crate::config::{QnaConfig, RecognizerConfig, TranslatorConfig};
use crate::language::classification::LanguageCode;
use crate::nlu::{
    Entity, HOME_AUTOMATION_PROVIDER, Intent, IntentSummary, QnaError, RankedAnswer,
    RecognitionError, RecognizerResult, ScoredIntent, WEATHER_PROVIDER,
};
use crate::translation::TranslationError;

pub struct AzureRecognizer {
    app_id: String,
    key: String,
    host: String,
    client: ReqwestClient,
}

impl AzureRecognizer {
    #[must_use]
    pub fn new(config: &RecognizerConfig) -> Self {
        Self {
            app_id: config.app_id.clone(),
            key: config.key.clone(),
            host: config.host.clone(),
            client: ReqwestClient::new(),
        }
    }

    pub async fn recognize(&self, utterance: &str) -> Result<RecognizerResult, RecognitionError> {
        let url = format!("https://{}/luis/v2.0/apps/{}", self.host, self.app_id);
        let raw: serde_json::Value = self
            .client
            .get(url)
            .query(&[
                ("subscription-key", self.key.as_str()),
                ("verbose", "true"),
                ("q", utterance),
            ])
            .send()
            .await
            .map_err(|err| RecognitionError::Remote(err.to_string()))?
            .error_for_status()
            .map_err(|err| RecognitionError::Remote(err.to_string()))?
            .json()
            .await
            .map_err(|err| RecognitionError::Payload(err.to_string()))?;

        let body: luis_api::PredictionBody = serde_json::from_value(raw.clone())
            .map_err(|err| RecognitionError::Payload(err.to_string()))?;
        Ok(map_prediction(body, raw))
    }
}

fn map_prediction(body: luis_api::PredictionBody, raw: serde_json::Value) -> RecognizerResult {
    let top_intent = body
        .top_scoring_intent
        .as_ref()
        .map_or_else(|| "None".to_owned(), |scored| scored.intent.clone());

    // The connected app's result is stored under the provider the top
    // intent names; other intents carry no sub-result.
    let provider = match Intent::from_label(&top_intent) {
        Intent::HomeAutomation => Some(HOME_AUTOMATION_PROVIDER),
        Intent::Weather => Some(WEATHER_PROVIDER),
        Intent::SampleQna | Intent::Unknown(_) => None,
    };

    let mut sub_results = std::collections::HashMap::new();
    if let (Some(provider), Some(connected)) = (provider, body.connected_service_result) {
        sub_results.insert(provider.to_owned(), map_summary(connected));
    }

    RecognizerResult {
        top_intent,
        sub_results,
        raw,
    }
}

fn map_summary(connected: luis_api::ConnectedServiceResult) -> IntentSummary {
    // With verbose results the ranked intent list is populated; fall back
    // to the top-scoring intent alone when it is not.
    let intents = if connected.intents.is_empty() {
        connected.top_scoring_intent.into_iter().collect()
    } else {
        connected.intents
    };
    IntentSummary {
        intents: intents
            .into_iter()
            .map(|scored| ScoredIntent {
                intent: scored.intent,
                score: scored.score,
            })
            .collect(),
        entities: connected
            .entities
            .into_iter()
            .map(|entity| Entity {
                value: entity.entity,
                category: entity.kind,
            })
            .collect(),
    }
}

pub struct AzureTranslator {
    key: String,
    host: String,
    client: ReqwestClient,
}

impl AzureTranslator {
    #[must_use]
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            key: config.key.clone(),
            host: config.host.clone(),
            client: ReqwestClient::new(),
        }
    }

    pub async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        let url = format!("https://{}/translate", self.host);
        let target = target.to_string();
        let request = vec![translator_api::Subject {
            text: text.to_owned(),
        }];
        let response: Vec<translator_api::TranslatedItem> = self
            .client
            .post(url)
            .query(&[("api-version", "3.0"), ("to", target.as_str())])
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .json(&request)
            .send()
            .await
            .map_err(|err| TranslationError::Remote(err.to_string()))?
            .error_for_status()
            .map_err(|err| TranslationError::Remote(err.to_string()))?
            .json()
            .await
            .map_err(|err| TranslationError::Remote(err.to_string()))?;

        first_translation(response)
    }
}

fn first_translation(
    response: Vec<translator_api::TranslatedItem>,
) -> Result<String, TranslationError> {
    response
        .into_iter()
        .flat_map(|item| item.translations)
        .map(|translation| translation.text)
        .find(|text| !text.is_empty())
        .ok_or(TranslationError::Empty)
}

pub struct AzureKnowledgeBase {
    knowledge_base_id: String,
    key: String,
    host: String,
    client: ReqwestClient,
}

impl AzureKnowledgeBase {
    #[must_use]
    pub fn new(config: &QnaConfig) -> Self {
        Self {
            knowledge_base_id: config.knowledge_base_id.clone(),
            key: config.key.clone(),
            host: config.host.clone(),
            client: ReqwestClient::new(),
        }
    }

    pub async fn answers(&self, utterance: &str) -> Result<Vec<RankedAnswer>, QnaError> {
        let url = format!(
            "https://{}/qnamaker/knowledgebases/{}/generateAnswer",
            self.host, self.knowledge_base_id
        );
        let request = qna_api::Question {
            question: utterance.to_owned(),
        };
        let response: qna_api::AnswersBody = self
            .client
            .post(url)
            .header("Authorization", format!("EndpointKey {}", self.key))
            .json(&request)
            .send()
            .await
            .map_err(|err| QnaError::Remote(err.to_string()))?
            .error_for_status()
            .map_err(|err| QnaError::Remote(err.to_string()))?
            .json()
            .await
            .map_err(|err| QnaError::Payload(err.to_string()))?;

        Ok(map_answers(response))
    }
}

fn map_answers(body: qna_api::AnswersBody) -> Vec<RankedAnswer> {
    body.answers
        .into_iter()
        // The service reports "no match" as a sentinel answer with score
        // zero; callers see an empty result instead.
        .filter(|answer| answer.score > 0.0)
        .map(|answer| RankedAnswer {
            answer: answer.answer,
            score: answer.score,
        })
        .collect()
}

mod luis_api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PredictionBody {
        pub query: Option<String>,
        pub top_scoring_intent: Option<ScoredIntentBody>,
        #[serde(default)]
        pub intents: Vec<ScoredIntentBody>,
        #[serde(default)]
        pub entities: Vec<EntityBody>,
        pub connected_service_result: Option<ConnectedServiceResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ScoredIntentBody {
        pub intent: String,
        #[serde(default)]
        pub score: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct EntityBody {
        pub entity: String,
        #[serde(rename = "type")]
        pub kind: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ConnectedServiceResult {
        pub top_scoring_intent: Option<ScoredIntentBody>,
        #[serde(default)]
        pub intents: Vec<ScoredIntentBody>,
        #[serde(default)]
        pub entities: Vec<EntityBody>,
    }
}

mod translator_api {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct Subject {
        #[serde(rename = "Text")]
        pub text: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct TranslatedItem {
        #[serde(default)]
        pub translations: Vec<Translation>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Translation {
        pub text: String,
        pub to: String,
    }
}

mod qna_api {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct Question {
        pub question: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct AnswersBody {
        #[serde(default)]
        pub answers: Vec<AnswerBody>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AnswerBody {
        pub answer: String,
        #[serde(default)]
        pub score: f64,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::nlu::WEATHER_PROVIDER;

    use super::{first_translation, map_answers, map_prediction};

    #[test]
    fn prediction_with_connected_result_keeps_the_sub_result() {
        let raw = json!({
            "query": "forecast for seattle",
            "topScoringIntent": { "intent": "l_Weather", "score": 0.97 },
            "intents": [
                { "intent": "l_Weather", "score": 0.97 },
                { "intent": "l_HomeAutomation", "score": 0.02 }
            ],
            "entities": [],
            "connectedServiceResult": {
                "topScoringIntent": { "intent": "Weather.GetForecast", "score": 0.93 },
                "intents": [
                    { "intent": "Weather.GetForecast", "score": 0.93 },
                    { "intent": "Weather.GetConditions", "score": 0.11 }
                ],
                "entities": [
                    { "entity": "seattle", "type": "Weather.Location" }
                ]
            }
        });
        let body = serde_json::from_value(raw.clone()).unwrap();

        let result = map_prediction(body, raw);

        assert_eq!(result.top_intent, "l_Weather");
        let weather = result.sub_result(WEATHER_PROVIDER);
        assert_eq!(weather.top_intent(), "Weather.GetForecast");
        assert_eq!(weather.intents.len(), 2);
        assert_eq!(weather.entities[0].value, "seattle");
        assert_eq!(weather.entities[0].category, "Weather.Location");
    }

    #[test]
    fn prediction_without_connected_result_has_no_sub_results() {
        let raw = json!({
            "query": "why is the sky blue",
            "topScoringIntent": { "intent": "q_sample-qna", "score": 0.88 }
        });
        let body = serde_json::from_value(raw.clone()).unwrap();

        let result = map_prediction(body, raw);

        assert_eq!(result.top_intent, "q_sample-qna");
        assert!(result.sub_results.is_empty());
    }

    #[test]
    fn prediction_without_intents_reports_none() {
        let raw = json!({ "query": "" });
        let body = serde_json::from_value(raw.clone()).unwrap();

        let result = map_prediction(body, raw);

        assert_eq!(result.top_intent, "None");
    }

    #[test]
    fn the_first_nonempty_translation_wins() {
        let response = serde_json::from_value(json!([
            { "translations": [ { "text": "", "to": "en" } ] },
            { "translations": [ { "text": "hello", "to": "en" } ] }
        ]))
        .unwrap();

        assert_eq!(first_translation(response).unwrap(), "hello");
    }

    #[test]
    fn an_empty_translation_response_is_an_error() {
        let response = serde_json::from_value(json!([])).unwrap();
        assert!(first_translation(response).is_err());
    }

    #[test]
    fn zero_score_sentinel_answers_are_dropped() {
        let body = serde_json::from_value(json!({
            "answers": [
                { "answer": "No good match found in KB.", "score": 0.0 }
            ]
        }))
        .unwrap();

        assert!(map_answers(body).is_empty());
    }

    #[test]
    fn answers_keep_the_provider_ranking() {
        let body = serde_json::from_value(json!({
            "answers": [
                { "answer": "42", "score": 90.5 },
                { "answer": "43", "score": 12.0 }
            ]
        }))
        .unwrap();

        let answers = map_answers(body);
        assert_eq!(answers[0].answer, "42");
        assert_eq!(answers[1].answer, "43");
    }
}
