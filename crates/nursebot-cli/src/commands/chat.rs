//! The `nursebot chat` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use nursebot_core::chat::{ChatRelay, ChatWindow};
use nursebot_providers::config::load_config_from;

use crate::EndpointArgs;

pub async fn execute(with_context: bool, pdf: Option<PathBuf>, endpoint: EndpointArgs) -> Result<()> {
    let config = load_config_from(endpoint.config.as_deref())?;
    let provider = config.create_provider(endpoint.provider.as_deref())?;
    let model = endpoint.model.unwrap_or_else(|| config.chat_model.clone());

    let mut relay = ChatRelay::new(provider.as_ref(), model.as_str());
    if with_context {
        let pdf = pdf.unwrap_or_else(|| config.pdf.path.clone());
        if let Some(index) = super::build_context(provider.as_ref(), &config, &pdf).await {
            eprintln!("Loaded {} context chunks from {}", index.len(), pdf.display());
            relay = relay.with_context(index);
        }
    }

    eprintln!(
        "Chatting with {} via {}. Type `exit` to quit.",
        model,
        provider.name()
    );

    let mut window = ChatWindow::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            println!();
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        // Blank lines are ignored by the relay.
        if let Some(reply) = relay.send(&mut window, &line).await {
            println!("{reply}");
        }
    }

    Ok(())
}
