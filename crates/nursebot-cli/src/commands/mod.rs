//! Subcommand implementations and the helpers they share.

pub mod ask;
pub mod chat;
pub mod extract;
pub mod fluid;
pub mod grade;
pub mod init;
pub mod parse;
pub mod quiz;

use std::path::Path;

use nursebot_core::retrieval::ContextIndex;
use nursebot_core::traits::{LlmProvider, TextExtractor};
use nursebot_pdf::PdfEngine;
use nursebot_providers::NursebotConfig;

pub(crate) fn pdf_engine(config: &NursebotConfig) -> PdfEngine {
    PdfEngine::from_library_dir(config.pdf.library_dir.as_deref())
}

/// Extract and embed the PDF for context retrieval.
///
/// Failures are reported on stderr and chat carries on without context.
pub(crate) async fn build_context(
    provider: &dyn LlmProvider,
    config: &NursebotConfig,
    pdf: &Path,
) -> Option<ContextIndex> {
    let text = match pdf_engine(config).extract_text(pdf) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("context extraction failed: {e}");
            eprintln!("Context unavailable ({e}); answering without it.");
            return None;
        }
    };

    match ContextIndex::build(provider, &config.embedding_model, &text, config.chunk_words).await {
        Ok(index) if !index.is_empty() => Some(index),
        Ok(_) => {
            eprintln!("Context unavailable (PDF has no text); answering without it.");
            None
        }
        Err(e) => {
            tracing::warn!("context embedding failed: {e:#}");
            eprintln!("Context unavailable ({e:#}); answering without it.");
            None
        }
    }
}
