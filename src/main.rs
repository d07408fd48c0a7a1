use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use switchboard::app_composite::AppComposite;
use switchboard::config;
use switchboard::language::preference::ConversationId;
use switchboard::transport::ConsoleTransport;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize rustls crypto provider, for secure connections
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .unwrap();

    let config = config::from_env()?;
    let app = AppComposite::new(&config);

    let transport = ConsoleTransport::new();
    let conversation = ConversationId::new("console");

    // Ctrl-C cancels the root token; in-flight turns stop at their next
    // external call.
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        });
    }

    app.logger
        .lock()
        .unwrap()
        .info("Listening on the console. Type a message and press enter.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            () = shutdown.cancelled() => break,
            line = lines.next_line() => line.context("could not read from the terminal")?,
        };
        let Some(line) = line else { break };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        app.on_turn(&conversation, text, &transport, shutdown.child_token())
            .await?;
    }

    Ok(())
}
