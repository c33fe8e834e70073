//! The `nursebot ask` command.

use std::path::PathBuf;

use anyhow::Result;

use nursebot_core::chat::{ChatRelay, ChatWindow};
use nursebot_providers::config::load_config_from;
use nursebot_report::text::render_transcript;

use crate::EndpointArgs;

pub async fn execute(
    question: String,
    with_context: bool,
    pdf: Option<PathBuf>,
    endpoint: EndpointArgs,
) -> Result<()> {
    let config = load_config_from(endpoint.config.as_deref())?;
    let provider = config.create_provider(endpoint.provider.as_deref())?;
    let model = endpoint.model.unwrap_or_else(|| config.chat_model.clone());

    let mut relay = ChatRelay::new(provider.as_ref(), model);
    if with_context {
        let pdf = pdf.unwrap_or_else(|| config.pdf.path.clone());
        if let Some(index) = super::build_context(provider.as_ref(), &config, &pdf).await {
            relay = relay.with_context(index);
        }
    }

    let mut window = ChatWindow::new();
    if relay.send(&mut window, &question).await.is_none() {
        println!("Nothing to ask: the question is blank.");
        return Ok(());
    }

    print!("{}", render_transcript(window.entries()));
    Ok(())
}
