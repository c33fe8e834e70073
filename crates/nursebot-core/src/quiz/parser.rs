//! Regex extraction of multiple-choice questions from model output.
//!
//! The model is asked for blocks shaped like
//!
//! ```text
//! Q: <question>
//! A) <option>
//! B) <option>
//! Answer: <letter>
//! ```
//!
//! but nothing guarantees it complies. Blocks that do not match are dropped
//! without partial recovery, and the answer letter is taken as written.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{QuizOption, QuizQuestion};

/// `Q:` text, one or more `X) ...` lines, then `Answer: X`. Dot spans lines.
static QUESTION_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Q:\s*(.*?)\n([A-Z]\) .*?\n)+Answer:\s*([A-Z])")
        .expect("question block pattern is valid")
});

/// A single `X) text` line. The text stops at any line terminator, so a
/// `\r\n` line yields no option.
static OPTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z])\) ([^\n\r\u{2028}\u{2029}]*?)\n").expect("option line pattern is valid")
});

const ANSWER_MARKER: &str = "Answer:";

/// Parse every well-formed question block, in order of appearance.
///
/// An empty vector means nothing could be parsed.
pub fn parse_quiz(text: &str) -> Vec<QuizQuestion> {
    QUESTION_BLOCK
        .captures_iter(text)
        .map(|caps| {
            let block = caps.get(0).map_or("", |m| m.as_str());
            let question = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let answer = caps.get(3).map_or("", |m| m.as_str()).trim().to_string();

            let options_block = block.split(ANSWER_MARKER).next().unwrap_or_default();
            let options = OPTION_LINE
                .captures_iter(options_block)
                .map(|opt| QuizOption {
                    key: opt[1].to_string(),
                    text: opt[2].to_string(),
                })
                .collect();

            QuizQuestion {
                question,
                options,
                answer,
            }
        })
        .collect()
}

/// Result of parsing a model reply: either questions to render, or the raw
/// text to show verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "lowercase")]
pub enum ParsedQuiz {
    Questions(Vec<QuizQuestion>),
    Unparsed(String),
}

impl ParsedQuiz {
    pub fn from_model_output(text: &str) -> Self {
        let questions = parse_quiz(text);
        if questions.is_empty() {
            tracing::debug!("no question blocks matched, falling back to raw text");
            ParsedQuiz::Unparsed(text.to_string())
        } else {
            ParsedQuiz::Questions(questions)
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        match self {
            ParsedQuiz::Questions(q) => q,
            ParsedQuiz::Unparsed(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_QUESTIONS: &str = "Here is your quiz:

Q: What is the normal heart rate of a newborn?
A) 60-80 bpm
B) 120-160 bpm
C) 200-220 bpm
Answer: B

Q: Which vaccine is given at birth?
A) Hepatitis B
B) MMR
C) Varicella
Answer: A

Q: When should breastfeeding be initiated?
A) After 24 hours
B) After the first bath
C) Within the first hour
Answer: C
";

    #[test]
    fn parses_well_formed_quiz() {
        let questions = parse_quiz(THREE_QUESTIONS);
        assert_eq!(questions.len(), 3);
        for q in &questions {
            assert!(q.options.len() >= 2);
            assert!(THREE_QUESTIONS.contains(&format!("Answer: {}", q.answer)));
        }
        assert_eq!(
            questions[0].question,
            "What is the normal heart rate of a newborn?"
        );
        assert_eq!(questions[0].options[1].key, "B");
        assert_eq!(questions[0].options[1].text, "120-160 bpm");
        assert_eq!(questions[1].answer, "A");
        assert_eq!(questions[2].answer, "C");
    }

    #[test]
    fn zero_matches_yield_empty_and_fallback() {
        let text = "I'm sorry, I cannot create a quiz from this content.";
        assert!(parse_quiz(text).is_empty());
        assert_eq!(
            ParsedQuiz::from_model_output(text),
            ParsedQuiz::Unparsed(text.to_string())
        );
        assert!(ParsedQuiz::from_model_output(text).questions().is_empty());
    }

    #[test]
    fn trailing_malformed_block_is_dropped() {
        let text = "Q: Good question?
A) yes
B) no
Answer: A

Q: Missing answer line
A) one
B) two
";
        let questions = parse_quiz(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer, "A");
        assert_eq!(questions[0].options.len(), 2);
    }

    #[test]
    fn unterminated_block_runs_into_the_next() {
        let text = "Q: Missing answer line
A) one
B) two

Q: Good question?
A) yes
B) no
Answer: A";
        let questions = parse_quiz(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Missing answer line");
        let keys: Vec<&str> = questions[0].options.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "A", "B"]);
    }

    #[test]
    fn answer_key_is_not_validated() {
        let text = "Q: Which is right?\nA) this\nB) that\nAnswer: D";
        let questions = parse_quiz(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer, "D");
        assert!(!questions[0].has_option("D"));
    }

    #[test]
    fn lowercase_answer_does_not_match() {
        let text = "Q: Which?\nA) this\nB) that\nAnswer: b";
        assert!(parse_quiz(text).is_empty());
    }

    #[test]
    fn answer_may_follow_on_next_line() {
        let text = "Q: Which?\nA) this\nB) that\nAnswer:\nB";
        let questions = parse_quiz(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer, "B");
    }

    #[test]
    fn crlf_lines_yield_no_options() {
        let questions = parse_quiz("Q: a\r\nA) x\r\nB) y\r\nAnswer: A");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "a");
        assert!(questions[0].options.is_empty());
        assert_eq!(questions[0].answer, "A");
    }

    #[test]
    fn line_separator_ends_option_text() {
        let questions = parse_quiz("Q: a\nA) x\u{2028}y\nB) z\nAnswer: B");
        assert_eq!(questions.len(), 1);
        let keys: Vec<&str> = questions[0].options.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, ["B"]);
    }

    #[test]
    fn parsed_quiz_serde_shape() {
        let parsed = ParsedQuiz::from_model_output("nothing");
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["kind"], "unparsed");
        assert_eq!(json["body"], "nothing");
    }
}
