//! One inbound-message-to-outbound-reply processing cycle.

pub mod context;
pub mod dispatcher;
pub mod error_boundary;
pub mod handlers;

use std::future::Future;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::language::preference::StoreError;
use crate::nlu::{QnaError, RecognitionError};
use crate::translation::TranslationError;
use crate::transport::TransportError;

/// Everything that can end a turn early. The dispatcher performs no
/// local recovery; these surface to the error boundary untouched.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Recognition(#[from] RecognitionError),
    #[error(transparent)]
    Qna(#[from] QnaError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The transport cancelled the turn, e.g. the client disconnected.
    #[error("the turn was cancelled by the transport")]
    Cancelled,
}

/// Race one suspending call against the turn's cancellation signal. The
/// signal is checked before the call is first polled, so an already
/// cancelled turn never issues it; state written by earlier calls stays
/// written.
pub(crate) async fn cancellable<T, E>(
    cancellation: &CancellationToken,
    call: impl Future<Output = Result<T, E>>,
) -> Result<T, TurnError>
where
    TurnError: From<E>,
{
    tokio::select! {
        biased;
        () = cancellation.cancelled() => Err(TurnError::Cancelled),
        result = call => result.map_err(TurnError::from),
    }
}
