//! nursebot-report: rendering of quizzes, feedback and chat transcripts.
//!
//! `text` renders for the terminal; `html` produces a self-contained page
//! whose form carries the `quiz-form`, `quiz-feedback` and `q{i}`
//! identifiers.

pub mod html;
pub mod text;
