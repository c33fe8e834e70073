//! Plain-text rendering for the terminal.

use nursebot_core::chat::ChatEntry;
use nursebot_core::model::QuizQuestion;
use nursebot_core::quiz::{GradeReport, ParsedQuiz};

/// Numbered questions, each followed by its lettered options and a blank
/// line.
pub fn render_questions(questions: &[QuizQuestion]) -> String {
    let mut out = String::new();
    for (i, q) in questions.iter().enumerate() {
        out.push_str(&format!("Q{}: {}\n", i + 1, q.question));
        for opt in &q.options {
            out.push_str(&format!("{}) {}\n", opt.key, opt.text));
        }
        out.push('\n');
    }
    out
}

/// Questions when parsed, the raw reply verbatim otherwise.
pub fn render_quiz(quiz: &ParsedQuiz) -> String {
    match quiz {
        ParsedQuiz::Questions(questions) => render_questions(questions),
        ParsedQuiz::Unparsed(raw) => {
            let mut out = raw.clone();
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out
        }
    }
}

/// One label per question followed by the score line.
pub fn render_feedback(report: &GradeReport) -> String {
    let mut out = String::new();
    for outcome in &report.outcomes {
        out.push_str(&outcome.label());
        out.push('\n');
    }
    out.push_str(&report.summary());
    out.push('\n');
    out
}

/// `Sender: text` lines.
pub fn render_transcript(entries: &[ChatEntry]) -> String {
    entries.iter().map(|e| format!("{e}\n")).collect()
}
