//! Sole recovery point for failed turns.

use std::sync::{Arc, Mutex};

use crate::logger::Logger;
use crate::transport::{Transport, TransportError};

use super::TurnError;

pub const APOLOGY_REPLY: &str = "Sorry, it looks like something went wrong.";
pub const DEPLOYMENT_NOTE: &str = "This bot has no language models deployed. Configure the \
     recognizer, translator and knowledge base endpoints, then restart it.";

/// Wraps the whole per-turn pipeline. Replies already sent earlier in the
/// turn are not retracted; the apology simply follows them.
pub struct ErrorBoundary {
    logger: Arc<Mutex<dyn Logger>>,
    collaborators_configured: bool,
}

impl ErrorBoundary {
    #[must_use]
    pub fn new(logger: Arc<Mutex<dyn Logger>>, collaborators_configured: bool) -> Self {
        Self {
            logger,
            collaborators_configured,
        }
    }

    /// Log the failure and apologize to the user. A failure while sending
    /// the apology is not recovered here; it propagates to the transport.
    pub async fn handle<X: Transport>(
        &self,
        error: &TurnError,
        transport: &X,
    ) -> Result<(), TransportError> {
        if matches!(error, TurnError::Cancelled) {
            // A cancelled turn gets no apology; the peer is gone.
            self.logger
                .lock()
                .unwrap()
                .debug("Turn cancelled by the transport");
            return Ok(());
        }

        self.logger
            .lock()
            .unwrap()
            .error(&format!("Turn failed: {error}"));

        transport.send_reply(APOLOGY_REPLY).await?;
        if !self.collaborators_configured {
            transport.send_reply(DEPLOYMENT_NOTE).await?;
        }
        Ok(())
    }
}
