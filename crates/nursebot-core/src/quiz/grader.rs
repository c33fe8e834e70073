//! Local grading of a submitted quiz.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SubmissionError;
use crate::model::QuizQuestion;

/// Per-question grading result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// 1-based question number.
    pub number: usize,
    pub selected: String,
    pub correct_answer: String,
    pub correct: bool,
}

impl QuestionOutcome {
    /// Feedback line, e.g. `Q2: Incorrect. Correct answer: B`.
    pub fn label(&self) -> String {
        if self.correct {
            format!("Q{}: Correct!", self.number)
        } else {
            format!(
                "Q{}: Incorrect. Correct answer: {}",
                self.number, self.correct_answer
            )
        }
    }
}

/// Score for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeReport {
    pub outcomes: Vec<QuestionOutcome>,
    pub score: usize,
    pub total: usize,
}

impl GradeReport {
    /// Summary line, e.g. `Your score: 2 / 3`.
    pub fn summary(&self) -> String {
        format!("Your score: {self}")
    }
}

impl fmt::Display for GradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.score, self.total)
    }
}

/// Parse a comma-separated answer list such as `"A, c,,B"`.
///
/// Letters are upper-cased; blank entries become `None` so the missing
/// question can be reported by number.
pub fn parse_answers(raw: &str) -> Vec<Option<String>> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(|s| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_uppercase())
        })
        .collect()
}

/// Check that every question has exactly one selection among its displayed
/// options, returning the selections.
pub fn validate_submission(
    questions: &[QuizQuestion],
    selections: &[Option<String>],
) -> Result<Vec<String>, SubmissionError> {
    if selections.len() != questions.len() {
        return Err(SubmissionError::WrongCount {
            expected: questions.len(),
            got: selections.len(),
        });
    }

    questions
        .iter()
        .zip(selections)
        .enumerate()
        .map(|(i, (question, selection))| {
            let key = selection
                .as_deref()
                .ok_or(SubmissionError::Missing { question: i + 1 })?;
            if !question.has_option(key) {
                return Err(SubmissionError::UnknownOption {
                    question: i + 1,
                    key: key.to_string(),
                });
            }
            Ok(key.to_string())
        })
        .collect()
}

/// Grade a submission by exact comparison with each answer key.
pub fn grade(
    questions: &[QuizQuestion],
    selections: &[Option<String>],
) -> Result<GradeReport, SubmissionError> {
    let selected = validate_submission(questions, selections)?;

    let outcomes: Vec<QuestionOutcome> = questions
        .iter()
        .zip(selected)
        .enumerate()
        .map(|(i, (question, selected))| QuestionOutcome {
            number: i + 1,
            correct: selected == question.answer,
            selected,
            correct_answer: question.answer.clone(),
        })
        .collect();

    let score = outcomes.iter().filter(|o| o.correct).count();
    tracing::debug!(score, total = outcomes.len(), "quiz graded");

    Ok(GradeReport {
        total: outcomes.len(),
        score,
        outcomes,
    })
}
