//! The `nursebot init` command.

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("nursebot.toml");
    if path.exists() {
        println!("nursebot.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG).context("failed to write nursebot.toml")?;
        println!("Created nursebot.toml");
    }

    println!("\nNext steps:");
    println!("  1. Start LM Studio and load a chat model (or edit the provider settings)");
    println!("  2. Point [pdf] at the KKH Information file and the PDFium library");
    println!("  3. Run: nursebot ask \"How often should a newborn feed?\"");
    println!("  4. Run: nursebot quiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# nursebot configuration

default_provider = "lmstudio"
chat_model = "tinyllama-1.1b-chat-v1"
embedding_model = "paraphrase-MiniLM-L3-v2"
request_timeout_secs = 120
chunk_words = 500

[providers.lmstudio]
type = "lmstudio"
base_url = "http://127.0.0.1:1234"
# Values may reference environment variables, e.g. "${LMSTUDIO_URL}".

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"

[pdf]
path = "data/KKH Information file.pdf"
# library_dir = "/opt/pdfium/lib"

[quiz]
question_count = 3
excerpt_chars = 2000
min_pdf_chars = 100
"#;
