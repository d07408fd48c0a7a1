use tokio_util::sync::CancellationToken;

use crate::language::preference::ConversationId;
use crate::transport::Transport;

use super::{TurnError, cancellable};

/// Everything one inbound message carries through the pipeline. Dropped
/// when the turn ends; the language preference is the only state that
/// outlives it.
pub struct TurnContext<'a, X: Transport> {
    conversation: &'a ConversationId,
    text: String,
    transport: &'a X,
    cancellation: CancellationToken,
}

impl<'a, X: Transport> TurnContext<'a, X> {
    #[must_use]
    pub fn new(
        conversation: &'a ConversationId,
        text: &str,
        transport: &'a X,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            conversation,
            text: text.to_owned(),
            transport,
            cancellation,
        }
    }

    #[must_use]
    pub fn conversation(&self) -> &ConversationId {
        self.conversation
    }

    /// The working text: the raw utterance, until translation replaces it.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub async fn send_reply(&self, text: &str) -> Result<(), TurnError> {
        cancellable(&self.cancellation, self.transport.send_reply(text)).await
    }
}
