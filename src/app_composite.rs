use std::sync::{Arc, Mutex};

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::language::preference::{ConversationId, InMemoryPreferenceStore};
use crate::logger::{ConsoleLogger, Logger};
use crate::providers::{KnowledgeBase, Recognizer, Translation};
use crate::transport::Transport;
use crate::turn::context::TurnContext;
use crate::turn::dispatcher::TurnDispatcher;
use crate::turn::error_boundary::ErrorBoundary;

pub struct AppComposite {
    dispatcher: TurnDispatcher<InMemoryPreferenceStore, Translation, Recognizer, KnowledgeBase>,
    error_boundary: ErrorBoundary,
    pub logger: Arc<Mutex<dyn Logger>>,
}

impl AppComposite {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let logger = ConsoleLogger::new(config.verbosity);
        let logger: Arc<Mutex<dyn Logger>> = Arc::new(Mutex::new(logger));

        let dispatcher = TurnDispatcher::new(
            InMemoryPreferenceStore::new(),
            Translation::from_config(config.translator.as_ref()),
            Recognizer::from_config(config.recognizer.as_ref()),
            KnowledgeBase::from_config(config.qna.as_ref()),
            logger.clone(),
        );

        Self {
            dispatcher,
            error_boundary: ErrorBoundary::new(logger.clone(), config.has_collaborators()),
            logger,
        }
    }

    /// Run one full turn: the pipeline plus the error boundary around it.
    /// `Err` here means even the failure reply could not be delivered;
    /// the transport is expected to report that upward.
    pub async fn on_turn<X: Transport>(
        &self,
        conversation: &ConversationId,
        text: &str,
        transport: &X,
        cancellation: CancellationToken,
    ) -> anyhow::Result<()> {
        let mut ctx = TurnContext::new(conversation, text, transport, cancellation);
        if let Err(error) = self.dispatcher.process_turn(&mut ctx).await {
            self.error_boundary
                .handle(&error, transport)
                .await
                .context("could not deliver the failure reply")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio_util::sync::CancellationToken;

    use crate::config::Config;
    use crate::language::preference::ConversationId;
    use crate::logger::Level;
    use crate::transport::{Transport, TransportError};
    use crate::turn::error_boundary::{APOLOGY_REPLY, DEPLOYMENT_NOTE};

    use super::AppComposite;

    struct RecordingTransport(Mutex<Vec<String>>);

    impl Transport for RecordingTransport {
        async fn send_reply(&self, text: &str) -> Result<(), TransportError> {
            self.0.lock().unwrap().push(text.to_owned());
            Ok(())
        }
    }

    fn bare_config() -> Config {
        Config {
            recognizer: None,
            qna: None,
            translator: None,
            verbosity: Level::Info,
        }
    }

    #[tokio::test]
    async fn unconfigured_bot_apologizes_and_points_at_the_deployment() {
        let app = AppComposite::new(&bare_config());
        let transport = RecordingTransport(Mutex::new(Vec::new()));

        app.on_turn(
            &ConversationId::new("console"),
            "will it rain",
            &transport,
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(
            transport.0.lock().unwrap().clone(),
            vec![APOLOGY_REPLY, DEPLOYMENT_NOTE]
        );
    }

    #[tokio::test]
    async fn language_switch_needs_no_collaborators() {
        let app = AppComposite::new(&bare_config());
        let transport = RecordingTransport(Mutex::new(Vec::new()));

        app.on_turn(
            &ConversationId::new("console"),
            "es",
            &transport,
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(
            transport.0.lock().unwrap().clone(),
            vec!["Your current language code is: es"]
        );
    }
}
