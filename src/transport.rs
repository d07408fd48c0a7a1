//! Delivering replies back to the user.

use std::future::Future;

use colored::Colorize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not deliver the reply: {0}")]
    Send(String),
}

/// Outbound half of the messaging channel. One turn may send several
/// replies.
pub trait Transport: Send + Sync {
    fn send_reply(&self, text: &str) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Prints replies to the terminal; the counterpart of the read-line loop
/// in `main`.
pub struct ConsoleTransport;

impl ConsoleTransport {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ConsoleTransport {
    async fn send_reply(&self, text: &str) -> Result<(), TransportError> {
        println!("{} {text}", "bot>".green());
        Ok(())
    }
}
