//! The `nursebot parse` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use nursebot_core::quiz::ParsedQuiz;
use nursebot_report::text::render_quiz;

pub fn execute(file: PathBuf, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let quiz = ParsedQuiz::from_model_output(&raw);

    if json {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
    } else {
        match &quiz {
            ParsedQuiz::Questions(q) => eprintln!("Parsed {} questions", q.len()),
            ParsedQuiz::Unparsed(_) => eprintln!("No questions found; showing the reply as-is"),
        }
        print!("{}", render_quiz(&quiz));
    }
    Ok(())
}
