//! The `nursebot grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use nursebot_core::quiz::{grade, parse_answers, GradeReport, ParsedQuiz};
use nursebot_report::text::render_feedback;

pub fn execute(quiz_path: PathBuf, answers: String) -> Result<()> {
    let content = std::fs::read_to_string(&quiz_path)
        .with_context(|| format!("failed to read {}", quiz_path.display()))?;
    let quiz: ParsedQuiz = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse quiz: {}", quiz_path.display()))?;

    let questions = quiz.questions();
    anyhow::ensure!(
        !questions.is_empty(),
        "{} contains no quiz questions",
        quiz_path.display()
    );

    let report = grade(questions, &parse_answers(&answers))?;

    print_summary(&report);
    print!("{}", render_feedback(&report));
    Ok(())
}

fn print_summary(report: &GradeReport) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Selected", "Correct answer", "Result"]);

    for outcome in &report.outcomes {
        table.add_row(vec![
            Cell::new(format!("Q{}", outcome.number)),
            Cell::new(&outcome.selected),
            Cell::new(&outcome.correct_answer),
            Cell::new(if outcome.correct { "Correct" } else { "Incorrect" }),
        ]);
    }

    println!("{table}");
}
