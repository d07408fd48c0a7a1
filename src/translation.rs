//! Call contract of the external text-translation capability.

use std::future::Future;

use thiserror::Error;

use crate::language::classification::LanguageCode;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("no translator is configured")]
    NotConfigured,
    #[error("the translation call failed: {0}")]
    Remote(String),
    #[error("the translator returned no translation")]
    Empty,
}

pub trait Translator: Send + Sync {
    /// Translate `text` into `target`. An empty translation is an error;
    /// the caller never silently keeps the source text.
    fn translate(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> impl Future<Output = Result<String, TranslationError>> + Send;
}
