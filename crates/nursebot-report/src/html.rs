//! HTML quiz page generator.
//!
//! Produces a self-contained HTML file with the CSS inlined. The form
//! carries the `quiz-form`, `quiz-feedback` and `q{i}` identifiers.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use nursebot_core::model::QuizQuestion;
use nursebot_core::quiz::{GradeReport, ParsedQuiz};

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render the quiz form.
///
/// Radio groups are named `q0`, `q1`, … and every group is `required`, so
/// a browser refuses a submission with a question left unanswered. When a
/// graded report is given the submitted choices are pre-checked and the
/// feedback block is filled in; otherwise it is left empty.
pub fn render_quiz_form(questions: &[QuizQuestion], graded: Option<&GradeReport>) -> String {
    let mut html = String::new();
    html.push_str("<form id=\"quiz-form\">\n");

    for (i, q) in questions.iter().enumerate() {
        let selected = graded
            .and_then(|r| r.outcomes.get(i))
            .map(|o| o.selected.as_str());

        html.push_str("<div class=\"quiz-q\">\n");
        html.push_str(&format!(
            "<p><strong>Q{}:</strong> {}</p>\n",
            i + 1,
            html_escape(&q.question)
        ));
        for opt in &q.options {
            let checked = if selected == Some(opt.key.as_str()) {
                " checked"
            } else {
                ""
            };
            html.push_str(&format!(
                "<label><input type=\"radio\" name=\"q{i}\" value=\"{}\" required{checked}> {}) {}</label><br>\n",
                html_escape(&opt.key),
                html_escape(&opt.key),
                html_escape(&opt.text)
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str("<button type=\"submit\">Check Answers</button>\n");
    html.push_str("</form>\n");

    html.push_str("<div id=\"quiz-feedback\">");
    if let Some(report) = graded {
        html.push('\n');
        html.push_str(&render_feedback(report));
    }
    html.push_str("</div>\n");
    html
}

/// Feedback lines as `<div>`s, one per question, then the score.
pub fn render_feedback(report: &GradeReport) -> String {
    let mut html = String::new();
    for outcome in &report.outcomes {
        let class = if outcome.correct { "correct" } else { "incorrect" };
        html.push_str(&format!(
            "<div class=\"{class}\">{}</div>\n",
            html_escape(&outcome.label())
        ));
    }
    html.push_str(&format!(
        "<div class=\"score\"><strong>{}</strong></div>\n",
        html_escape(&report.summary())
    ));
    html
}

/// Verbatim display of a reply that contained no question blocks.
pub fn render_fallback(raw: &str) -> String {
    format!("<pre>{}</pre>\n", html_escape(raw))
}

/// Form for parsed questions, `<pre>` fallback otherwise.
pub fn render_quiz(quiz: &ParsedQuiz, graded: Option<&GradeReport>) -> String {
    match quiz {
        ParsedQuiz::Questions(questions) => render_quiz_form(questions, graded),
        ParsedQuiz::Unparsed(raw) => render_fallback(raw),
    }
}

/// Generate a full HTML page for a quiz.
pub fn generate_html(
    quiz: &ParsedQuiz,
    graded: Option<&GradeReport>,
    created_at: DateTime<Utc>,
) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>KKH Nursing Quiz</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>KKH Nursing Quiz</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | generated {}</p>\n",
        quiz.questions().len(),
        created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    html.push_str("<section id=\"quiz-container\">\n");
    html.push_str(&render_quiz(quiz, graded));
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write a quiz page to a file, creating parent directories.
pub fn write_quiz_page(quiz: &ParsedQuiz, graded: Option<&GradeReport>, path: &Path) -> Result<()> {
    let html = generate_html(quiz, graded, Utc::now());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
.meta { color: #6b7280; }
.quiz-q { border: 1px solid var(--border); border-radius: 8px; padding: 0.5rem 1rem; margin: 1rem 0; }
label { display: inline-block; margin: 0.25rem 0; cursor: pointer; }
button { padding: 0.5rem 1.25rem; border-radius: 6px; border: 1px solid var(--border); cursor: pointer; }
#quiz-feedback { margin-top: 1rem; }
.correct { background: var(--pass); padding: 0.25rem 0.5rem; }
.incorrect { background: var(--fail); padding: 0.25rem 0.5rem; }
.score { margin-top: 0.5rem; }
pre { white-space: pre-wrap; padding: 1rem; background: var(--border); border-radius: 8px; }
"#;
