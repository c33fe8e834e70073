//! Quiz pipeline: generate from PDF text, parse model output, grade answers.

pub mod generator;
pub mod grader;
pub mod parser;

pub use generator::{build_quiz_prompt, QuizGenerator, QuizSettings};
pub use grader::{grade, parse_answers, GradeReport, QuestionOutcome};
pub use parser::{parse_quiz, ParsedQuiz};
