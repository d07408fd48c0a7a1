//! Response handlers, one per dispatchable intent.

use crate::nlu::{IntentSummary, QnaSource};
use crate::transport::Transport;

use super::context::TurnContext;
use super::{TurnError, cancellable};

pub const NO_ANSWER_REPLY: &str = "Sorry, could not find an answer in the Q and A system.";

pub async fn weather<X: Transport>(
    ctx: &TurnContext<'_, X>,
    weather: &IntentSummary,
) -> Result<(), TurnError> {
    ctx.send_reply(&format!("The top weather intent was {}.", weather.top_intent()))
        .await?;
    send_entities(ctx, weather).await
}

pub async fn home_automation<X: Transport>(
    ctx: &TurnContext<'_, X>,
    home: &IntentSummary,
) -> Result<(), TurnError> {
    ctx.send_reply(&format!(
        "The top home automation intent was {}.",
        home.top_intent()
    ))
    .await?;

    // Unlike weather, home automation always enumerates every candidate.
    let candidates = home
        .intents
        .iter()
        .map(|scored| scored.intent.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    ctx.send_reply(&format!("Home automation intents detected:\n\n{candidates}"))
        .await?;

    send_entities(ctx, home).await
}

pub async fn question_answering<X: Transport, Q: QnaSource>(
    ctx: &TurnContext<'_, X>,
    qna: &Q,
) -> Result<(), TurnError> {
    let answers = cancellable(ctx.cancellation(), qna.answers(ctx.text())).await?;
    match answers.first() {
        // "Top" is the provider's ranking; the first element wins.
        Some(top) => ctx.send_reply(&top.answer).await,
        None => ctx.send_reply(NO_ANSWER_REPLY).await,
    }
}

pub async fn unrecognized<X: Transport>(
    ctx: &TurnContext<'_, X>,
    label: &str,
) -> Result<(), TurnError> {
    ctx.send_reply(&format!("Dispatch unrecognized intent: {label}."))
        .await
}

async fn send_entities<X: Transport>(
    ctx: &TurnContext<'_, X>,
    result: &IntentSummary,
) -> Result<(), TurnError> {
    if result.entities.is_empty() {
        return Ok(());
    }
    let values = result
        .entities
        .iter()
        .map(|entity| entity.value.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    ctx.send_reply(&format!("Entities found in the message:\n\n{values}"))
        .await
}
