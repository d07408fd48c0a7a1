//! Per-conversation persistence of the language preference.

use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;
use tokio::sync::Mutex;

use super::classification::LanguageCode;

/// Key addressing one conversation's state. Each conversation's entry is
/// owned exclusively by that conversation's turns.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConversationId(String);

impl ConversationId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read conversation state: {0}")]
    Read(String),
    #[error("could not write conversation state: {0}")]
    Write(String),
}

/// Keyed store for the language preference. Entries are created lazily
/// (an absent read means "en" to the caller), overwritten by every switch
/// command, and never deleted.
pub trait PreferenceStore: Send + Sync {
    fn get(
        &self,
        conversation: &ConversationId,
    ) -> impl Future<Output = Result<Option<LanguageCode>, StoreError>> + Send;

    fn set(
        &self,
        conversation: &ConversationId,
        code: LanguageCode,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Flush pending writes. Called once per turn after a mutation.
    fn commit(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Process-local store; also the substitute the dispatcher tests run on.
pub struct InMemoryPreferenceStore {
    entries: Mutex<HashMap<ConversationId, LanguageCode>>,
}

impl InMemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, conversation: &ConversationId) -> Result<Option<LanguageCode>, StoreError> {
        Ok(self.entries.lock().await.get(conversation).copied())
    }

    async fn set(
        &self,
        conversation: &ConversationId,
        code: LanguageCode,
    ) -> Result<(), StoreError> {
        self.entries.lock().await.insert(conversation.clone(), code);
        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        // Writes land immediately; there is nothing buffered to flush.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_conversation_reads_as_absent() {
        let store = InMemoryPreferenceStore::new();
        let read = store.get(&ConversationId::new("nobody")).await.unwrap();
        assert_eq!(read, None);
    }

    #[tokio::test]
    async fn set_overwrites_the_previous_value() {
        let store = InMemoryPreferenceStore::new();
        let conversation = ConversationId::new("console");

        store.set(&conversation, LanguageCode::Es).await.unwrap();
        store.set(&conversation, LanguageCode::En).await.unwrap();
        store.commit().await.unwrap();

        let read = store.get(&conversation).await.unwrap();
        assert_eq!(read, Some(LanguageCode::En));
    }

    #[tokio::test]
    async fn conversations_do_not_share_state() {
        let store = InMemoryPreferenceStore::new();
        store
            .set(&ConversationId::new("a"), LanguageCode::Es)
            .await
            .unwrap();

        let read = store.get(&ConversationId::new("b")).await.unwrap();
        assert_eq!(read, None);
    }
}
