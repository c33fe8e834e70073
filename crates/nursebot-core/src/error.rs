//! Error types shared across nursebot crates.
//!
//! `ProviderError` and `PdfError` live here rather than in the crates that
//! raise them so the chat relay and quiz generator can downcast and classify
//! failures into their inline messages without string matching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when talking to a completion endpoint.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested model was not loaded by the local host.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The endpoint answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The endpoint answered, but the body was not the expected JSON shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// HTTP status of the failed response, if the endpoint was reached.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::ApiError { status, .. } => Some(*status),
            ProviderError::ModelNotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// Errors raised while extracting text from a PDF.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The PDF rendering library could not be bound.
    #[error("PDF engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The document could not be opened or parsed.
    #[error("failed to open {}: {message}", .path.display())]
    Open { path: PathBuf, message: String },

    /// A single page could not be read.
    #[error("failed to read page {page}: {message}")]
    Page { page: usize, message: String },
}

/// A calculator form field was missing or not a usable number.
#[derive(Debug, Error, PartialEq)]
pub enum FluidError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a non-negative number, got {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// A quiz submission that cannot be graded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("expected {expected} answers, got {got}")]
    WrongCount { expected: usize, got: usize },

    #[error("Q{question}: an answer is required")]
    Missing { question: usize },

    #[error("Q{question}: '{key}' is not one of the options")]
    UnknownOption { question: usize, key: String },
}

/// Failures of the PDF → LLM → quiz pipeline.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error("PDF text too short ({chars} chars)")]
    EmptyPdf { chars: usize },

    #[error("LLM API returned HTTP {status}")]
    LlmStatus { status: u16 },

    #[error("quiz generation failed: {0}")]
    Llm(String),
}

/// Inline message shown when the extracted PDF text is empty or too short.
pub const PDF_EMPTY_MESSAGE: &str = "PDF could not be loaded or is empty.";
/// Inline message shown when the PDF engine could not be loaded.
pub const PDF_ENGINE_MESSAGE: &str = "PDF engine failed to load. Check the PDFium library path.";
/// Inline message shown when the LLM endpoint rejects the request.
pub const LLM_STATUS_MESSAGE: &str = "Failed to contact LLM API. Check LM Studio.";
/// Inline message shown for any other quiz failure, including a PDF that
/// cannot be opened or read.
pub const QUIZ_FAILED_MESSAGE: &str = "Failed to generate quiz. (PDF or LLM error)";

impl QuizError {
    /// The fixed message the user sees for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            QuizError::Pdf(PdfError::EngineUnavailable(_)) => PDF_ENGINE_MESSAGE,
            QuizError::EmptyPdf { .. } => PDF_EMPTY_MESSAGE,
            QuizError::LlmStatus { .. } => LLM_STATUS_MESSAGE,
            QuizError::Pdf(PdfError::Open { .. } | PdfError::Page { .. }) | QuizError::Llm(_) => {
                QUIZ_FAILED_MESSAGE
            }
        }
    }

    /// Classify an error returned by an `LlmProvider`.
    pub fn from_provider(err: anyhow::Error) -> Self {
        match err.downcast_ref::<ProviderError>().and_then(ProviderError::status) {
            Some(status) => QuizError::LlmStatus { status },
            None => QuizError::Llm(format!("{err:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_error_messages() {
        let engine = QuizError::Pdf(PdfError::EngineUnavailable("no lib".into()));
        assert_eq!(engine.user_message(), PDF_ENGINE_MESSAGE);

        let open = QuizError::Pdf(PdfError::Open {
            path: PathBuf::from("missing.pdf"),
            message: "not found".into(),
        });
        assert_eq!(open.user_message(), QUIZ_FAILED_MESSAGE);

        let page = QuizError::Pdf(PdfError::Page {
            page: 2,
            message: "corrupt".into(),
        });
        assert_eq!(page.user_message(), QUIZ_FAILED_MESSAGE);
        assert_eq!(QuizError::EmptyPdf { chars: 12 }.user_message(), PDF_EMPTY_MESSAGE);
    }

    #[test]
    fn provider_status_is_classified() {
        let err = anyhow::Error::from(ProviderError::ApiError {
            status: 503,
            message: "loading".into(),
        });
        let quiz = QuizError::from_provider(err);
        assert!(matches!(quiz, QuizError::LlmStatus { status: 503 }));
        assert_eq!(quiz.user_message(), LLM_STATUS_MESSAGE);

        let err = anyhow::Error::from(ProviderError::NetworkError("refused".into()));
        let quiz = QuizError::from_provider(err);
        assert_eq!(quiz.user_message(), QUIZ_FAILED_MESSAGE);
        assert!(quiz.to_string().contains("refused"));
    }

    #[test]
    fn not_found_counts_as_status() {
        assert_eq!(ProviderError::ModelNotFound("x".into()).status(), Some(404));
        assert_eq!(ProviderError::Timeout(5).status(), None);
    }
}
