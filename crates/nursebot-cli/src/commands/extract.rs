//! The `nursebot extract` command.

use std::path::PathBuf;

use anyhow::Result;

use nursebot_core::error::{PdfError, PDF_EMPTY_MESSAGE, PDF_ENGINE_MESSAGE};
use nursebot_core::traits::TextExtractor;
use nursebot_providers::config::load_config_from;

pub fn execute(pdf: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let pdf = pdf.unwrap_or_else(|| config.pdf.path.clone());

    match super::pdf_engine(&config).extract_text(&pdf) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            tracing::warn!("extraction failed: {e}");
            match e {
                PdfError::EngineUnavailable(_) => println!("{PDF_ENGINE_MESSAGE}"),
                other => println!("{PDF_EMPTY_MESSAGE} ({other})"),
            }
        }
    }
    Ok(())
}
