//! The orchestrating component. For each inbound message it decides
//! switch-language vs. translate-then-recognize vs. plain recognition,
//! and routes the recognized top intent to its response handler.

use std::sync::{Arc, Mutex};

use crate::language::classification::{self, LanguageCode};
use crate::language::preference::PreferenceStore;
use crate::logger::Logger;
use crate::nlu::{HOME_AUTOMATION_PROVIDER, Intent, IntentRecognizer, QnaSource, WEATHER_PROVIDER};
use crate::translation::Translator;
use crate::transport::Transport;

use super::context::TurnContext;
use super::handlers;
use super::{TurnError, cancellable};

pub struct TurnDispatcher<S, T, R, Q>
where
    S: PreferenceStore,
    T: Translator,
    R: IntentRecognizer,
    Q: QnaSource,
{
    store: S,
    translator: T,
    recognizer: R,
    qna: Q,
    logger: Arc<Mutex<dyn Logger>>,
}

impl<S, T, R, Q> TurnDispatcher<S, T, R, Q>
where
    S: PreferenceStore,
    T: Translator,
    R: IntentRecognizer,
    Q: QnaSource,
{
    #[must_use]
    pub fn new(
        store: S,
        translator: T,
        recognizer: R,
        qna: Q,
        logger: Arc<Mutex<dyn Logger>>,
    ) -> Self {
        Self {
            store,
            translator,
            recognizer,
            qna,
            logger,
        }
    }

    /// One full turn: a single sequential chain of suspending calls. No
    /// retries; the first failure ends the turn and surfaces to the
    /// error boundary.
    pub async fn process_turn<X: Transport>(
        &self,
        ctx: &mut TurnContext<'_, X>,
    ) -> Result<(), TurnError> {
        if classification::is_language_switch(ctx.text()) {
            return self.switch_language(ctx).await;
        }

        let preference = cancellable(ctx.cancellation(), self.store.get(ctx.conversation()))
            .await?
            .unwrap_or_default();
        if preference == LanguageCode::Es {
            // A failed translation fails the turn; there is no fallback
            // to recognizing the untranslated text.
            let translated = cancellable(
                ctx.cancellation(),
                self.translator.translate(ctx.text(), LanguageCode::En),
            )
            .await?;
            ctx.set_text(translated);
        }

        let result =
            cancellable(ctx.cancellation(), self.recognizer.recognize(ctx.text())).await?;

        match Intent::from_label(&result.top_intent) {
            Intent::HomeAutomation => {
                handlers::home_automation(ctx, &result.sub_result(HOME_AUTOMATION_PROVIDER)).await
            }
            Intent::Weather => handlers::weather(ctx, &result.sub_result(WEATHER_PROVIDER)).await,
            Intent::SampleQna => handlers::question_answering(ctx, &self.qna).await,
            Intent::Unknown(label) => {
                self.logger
                    .lock()
                    .unwrap()
                    .warn(&format!("No handler for intent {label:?}"));
                handlers::unrecognized(ctx, &label).await
            }
        }
    }

    /// The switch path never calls the recognizer. The preference write
    /// and the confirmation are not one transaction: a crash in between
    /// leaves the preference updated but unacknowledged.
    async fn switch_language<X: Transport>(
        &self,
        ctx: &TurnContext<'_, X>,
    ) -> Result<(), TurnError> {
        let target = classification::resolve_target_language(ctx.text());
        cancellable(ctx.cancellation(), self.store.set(ctx.conversation(), target)).await?;
        ctx.send_reply(&format!("Your current language code is: {target}"))
            .await?;
        cancellable(ctx.cancellation(), self.store.commit()).await?;
        Ok(())
    }
}
