//! Gateway fronts over the cloud providers. Each front is either backed
//! by its HTTP client or left unconfigured; an unconfigured front fails
//! every call with its gateway's `NotConfigured` error, which the error
//! boundary turns into the missing-deployment note.

pub mod azure;

use crate::config::{QnaConfig, RecognizerConfig, TranslatorConfig};
use crate::language::classification::LanguageCode;
use crate::nlu::{
    IntentRecognizer, QnaError, QnaSource, RankedAnswer, RecognitionError, RecognizerResult,
};
use crate::translation::{TranslationError, Translator};

use azure::{AzureKnowledgeBase, AzureRecognizer, AzureTranslator};

pub struct Recognizer(RecognizerImpl);

impl Recognizer {
    #[must_use]
    pub fn from_config(config: Option<&RecognizerConfig>) -> Self {
        match config {
            Some(config) => Self(RecognizerImpl::Azure(AzureRecognizer::new(config))),
            None => Self(RecognizerImpl::Unconfigured),
        }
    }
}

enum RecognizerImpl {
    Azure(AzureRecognizer),
    Unconfigured,
}

impl IntentRecognizer for Recognizer {
    async fn recognize(&self, utterance: &str) -> Result<RecognizerResult, RecognitionError> {
        match &self.0 {
            RecognizerImpl::Azure(client) => client.recognize(utterance).await,
            RecognizerImpl::Unconfigured => Err(RecognitionError::NotConfigured),
        }
    }
}

pub struct Translation(TranslationImpl);

impl Translation {
    #[must_use]
    pub fn from_config(config: Option<&TranslatorConfig>) -> Self {
        match config {
            Some(config) => Self(TranslationImpl::Azure(AzureTranslator::new(config))),
            None => Self(TranslationImpl::Unconfigured),
        }
    }
}

enum TranslationImpl {
    Azure(AzureTranslator),
    Unconfigured,
}

impl Translator for Translation {
    async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        match &self.0 {
            TranslationImpl::Azure(client) => client.translate(text, target).await,
            TranslationImpl::Unconfigured => Err(TranslationError::NotConfigured),
        }
    }
}

pub struct KnowledgeBase(KnowledgeBaseImpl);

impl KnowledgeBase {
    #[must_use]
    pub fn from_config(config: Option<&QnaConfig>) -> Self {
        match config {
            Some(config) => Self(KnowledgeBaseImpl::Azure(AzureKnowledgeBase::new(config))),
            None => Self(KnowledgeBaseImpl::Unconfigured),
        }
    }
}

enum KnowledgeBaseImpl {
    Azure(AzureKnowledgeBase),
    Unconfigured,
}

impl QnaSource for KnowledgeBase {
    async fn answers(&self, utterance: &str) -> Result<Vec<RankedAnswer>, QnaError> {
        match &self.0 {
            KnowledgeBaseImpl::Azure(client) => client.answers(utterance).await,
            KnowledgeBaseImpl::Unconfigured => Err(QnaError::NotConfigured),
        }
    }
}
