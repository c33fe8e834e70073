//! The `nursebot quiz` command.

use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use nursebot_core::model::QuizQuestion;
use nursebot_core::quiz::{grade, parse_answers, GradeReport, ParsedQuiz, QuizGenerator};
use nursebot_providers::config::load_config_from;
use nursebot_report::html::write_quiz_page;
use nursebot_report::text::{render_feedback, render_quiz};

use crate::EndpointArgs;

pub async fn execute(
    pdf: Option<PathBuf>,
    answers: Option<String>,
    save: Option<PathBuf>,
    html: Option<PathBuf>,
    endpoint: EndpointArgs,
) -> Result<()> {
    let config = load_config_from(endpoint.config.as_deref())?;
    let provider = config.create_provider(endpoint.provider.as_deref())?;

    let mut settings = config.quiz_settings();
    if let Some(model) = endpoint.model {
        settings.model = model;
    }
    let pdf = pdf.unwrap_or_else(|| config.pdf.path.clone());
    let engine = super::pdf_engine(&config);

    eprintln!("Generating quiz from {}...", pdf.display());
    let quiz = match QuizGenerator::new(provider.as_ref(), settings)
        .generate(&engine, &pdf)
        .await
    {
        Ok(quiz) => quiz,
        Err(e) => {
            tracing::warn!("quiz generation failed: {e}");
            println!("{}", e.user_message());
            return Ok(());
        }
    };

    print!("{}", render_quiz(&quiz));

    if let Some(path) = &save {
        save_quiz(&quiz, path)?;
        eprintln!("Quiz saved to {}", path.display());
    }

    let report = match &quiz {
        ParsedQuiz::Questions(questions) => take_answers(questions, answers)?,
        ParsedQuiz::Unparsed(_) => None,
    };

    if let Some(path) = &html {
        write_quiz_page(&quiz, report.as_ref(), path)?;
        eprintln!("HTML quiz written to {}", path.display());
    }

    Ok(())
}

fn save_quiz(quiz: &ParsedQuiz, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(quiz)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Grade `--answers`, or answers typed at the terminal. Without either the
/// quiz is left ungraded.
fn take_answers(questions: &[QuizQuestion], answers: Option<String>) -> Result<Option<GradeReport>> {
    let selections = match answers {
        Some(raw) => parse_answers(&raw),
        None if std::io::stdin().is_terminal() => {
            let stdin = std::io::stdin();
            match prompt_answers(questions, &mut stdin.lock(), &mut std::io::stdout())? {
                Some(selections) => selections,
                None => return Ok(None),
            }
        }
        None => return Ok(None),
    };

    match grade(questions, &selections) {
        Ok(report) => {
            print!("{}", render_feedback(&report));
            Ok(Some(report))
        }
        Err(e) => {
            println!("Please answer every question with one of its options: {e}");
            Ok(None)
        }
    }
}

/// Ask for each answer until it names one of that question's options.
///
/// Returns `None` when input ends first, or when a question has no options
/// to choose from.
fn prompt_answers<R: BufRead, W: Write>(
    questions: &[QuizQuestion],
    input: &mut R,
    out: &mut W,
) -> Result<Option<Vec<Option<String>>>> {
    let mut selections = Vec::with_capacity(questions.len());

    for (i, question) in questions.iter().enumerate() {
        let number = i + 1;
        if question.options.is_empty() {
            writeln!(out, "Q{number} has no options to choose from; the quiz cannot be graded.")?;
            return Ok(None);
        }

        loop {
            write!(out, "Answer for Q{number}: ")?;
            out.flush().context("failed to flush output")?;

            let mut line = String::new();
            if input.read_line(&mut line).context("failed to read answer")? == 0 {
                writeln!(out)?;
                return Ok(None);
            }

            let key = line.trim().to_uppercase();
            if question.has_option(&key) {
                selections.push(Some(key));
                break;
            }

            let keys: Vec<&str> = question.options.iter().map(|o| o.key.as_str()).collect();
            writeln!(out, "Please choose one of: {}", keys.join(", "))?;
        }
    }

    Ok(Some(selections))
}
