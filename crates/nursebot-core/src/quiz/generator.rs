//! Quiz generation: PDF text → prompt → completion → parsed quiz.

use std::path::Path;

use crate::error::QuizError;
use crate::model::ChatMessage;
use crate::quiz::parser::ParsedQuiz;
use crate::traits::{CompletionRequest, LlmProvider, TextExtractor};

/// System prompt for quiz generation.
pub const QUIZ_SYSTEM_PROMPT: &str = "You are a helpful nurse assistant. Use only the provided PDF content to generate quiz questions and answers.";

/// Text parsed when the endpoint returns no content.
pub const NO_QUIZ_TEXT: &str = "No quiz generated.";

/// Knobs for quiz generation.
#[derive(Debug, Clone)]
pub struct QuizSettings {
    /// Model identifier sent to the endpoint.
    pub model: String,
    /// Number of questions requested in the prompt.
    pub question_count: usize,
    /// Characters of PDF text included in the prompt.
    pub excerpt_chars: usize,
    /// Extracted text shorter than this is treated as an empty PDF.
    pub min_pdf_chars: usize,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            model: "tinyllama-1.1b-chat-v1".to_string(),
            question_count: 3,
            excerpt_chars: 2000,
            min_pdf_chars: 100,
        }
    }
}

/// Build the user prompt from the head of the PDF text.
pub fn build_quiz_prompt(pdf_text: &str, question_count: usize, excerpt_chars: usize) -> String {
    let excerpt: String = pdf_text.chars().take(excerpt_chars).collect();
    format!(
        "Generate a multiple-choice quiz ({question_count} questions) with correct answers based only on the following information. Format: Q: ...\nA) ...\nB) ...\nC) ...\nAnswer: ...\n\nPDF Content:\n{excerpt}"
    )
}

/// Drives the extractor and the completion endpoint for one quiz.
pub struct QuizGenerator<'a> {
    provider: &'a dyn LlmProvider,
    settings: QuizSettings,
}

impl<'a> QuizGenerator<'a> {
    pub fn new(provider: &'a dyn LlmProvider, settings: QuizSettings) -> Self {
        Self { provider, settings }
    }

    /// Extract `pdf_path` and generate a quiz from its text.
    pub async fn generate(
        &self,
        extractor: &dyn TextExtractor,
        pdf_path: &Path,
    ) -> Result<ParsedQuiz, QuizError> {
        let text = extractor.extract_text(pdf_path)?;
        self.generate_from_text(&text).await
    }

    /// Generate a quiz from already-extracted text.
    pub async fn generate_from_text(&self, pdf_text: &str) -> Result<ParsedQuiz, QuizError> {
        let chars = pdf_text.chars().count();
        if chars < self.settings.min_pdf_chars {
            return Err(QuizError::EmptyPdf { chars });
        }

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(QUIZ_SYSTEM_PROMPT),
                ChatMessage::user(build_quiz_prompt(
                    pdf_text,
                    self.settings.question_count,
                    self.settings.excerpt_chars,
                )),
            ],
        };

        tracing::info!(
            provider = self.provider.name(),
            model = %request.model,
            pdf_chars = chars,
            "requesting quiz"
        );

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(QuizError::from_provider)?;

        let quiz_text = response
            .content
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| NO_QUIZ_TEXT.to_string());

        let parsed = ParsedQuiz::from_model_output(&quiz_text);
        tracing::info!(questions = parsed.questions().len(), "quiz parsed");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::{
        PdfError, ProviderError, LLM_STATUS_MESSAGE, PDF_EMPTY_MESSAGE, QUIZ_FAILED_MESSAGE,
    };
    use crate::traits::{CompletionResponse, EmbeddingRequest};

    struct ScriptedProvider {
        reply: Result<Option<String>, u16>,
        last: Mutex<Option<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn replying(text: Option<&str>) -> Self {
            Self {
                reply: Ok(text.map(String::from)),
                last: Mutex::new(None),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                last: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
            *self.last.lock().unwrap() = Some(request.clone());
            match &self.reply {
                Ok(content) => Ok(CompletionResponse {
                    content: content.clone(),
                    model: None,
                    latency_ms: 1,
                }),
                Err(status) => Err(ProviderError::ApiError {
                    status: *status,
                    message: "down".into(),
                }
                .into()),
            }
        }

        async fn embed(&self, _: &EmbeddingRequest) -> anyhow::Result<Vec<f32>> {
            Ok(vec![])
        }
    }

    struct FixedText(Result<String, ()>);

    impl TextExtractor for FixedText {
        fn extract_text(&self, path: &Path) -> Result<String, PdfError> {
            self.0.clone().map_err(|_| PdfError::Open {
                path: path.to_path_buf(),
                message: "missing".into(),
            })
        }
    }

    fn long_text() -> String {
        "Neonatal care guidance. ".repeat(200)
    }

    #[test]
    fn prompt_truncates_excerpt() {
        let prompt = build_quiz_prompt(&"x".repeat(5000), 3, 2000);
        assert!(prompt.starts_with("Generate a multiple-choice quiz (3 questions)"));
        assert!(prompt.contains("Format: Q: ...\nA) ...\nB) ...\nC) ...\nAnswer: ...\n\nPDF Content:\n"));
        assert_eq!(prompt.matches('x').count(), 2000);
    }

    #[tokio::test]
    async fn generates_and_parses() {
        let provider = ScriptedProvider::replying(Some(
            "Q: First?\nA) yes\nB) no\nAnswer: A\n\nQ: Second?\nA) up\nB) down\nAnswer: B",
        ));
        let generator = QuizGenerator::new(&provider, QuizSettings::default());
        let parsed = generator.generate_from_text(&long_text()).await.unwrap();
        assert_eq!(parsed.questions().len(), 2);

        let sent = provider.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.model, "tinyllama-1.1b-chat-v1");
        assert_eq!(sent.messages.len(), 2);
        assert_eq!(sent.messages[0].content, QUIZ_SYSTEM_PROMPT);
        assert!(sent.messages[1].content.contains("Neonatal care guidance."));
    }

    #[tokio::test]
    async fn missing_content_falls_back_to_placeholder_text() {
        let provider = ScriptedProvider::replying(None);
        let generator = QuizGenerator::new(&provider, QuizSettings::default());
        let parsed = generator.generate_from_text(&long_text()).await.unwrap();
        assert_eq!(parsed, ParsedQuiz::Unparsed(NO_QUIZ_TEXT.to_string()));
    }

    #[tokio::test]
    async fn short_pdf_is_rejected_before_request() {
        let provider = ScriptedProvider::replying(Some("unused"));
        let generator = QuizGenerator::new(&provider, QuizSettings::default());
        let err = generator.generate_from_text("too short").await.unwrap_err();
        assert!(matches!(err, QuizError::EmptyPdf { chars: 9 }));
        assert_eq!(err.user_message(), PDF_EMPTY_MESSAGE);
        assert!(provider.last.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn minimum_length_counts_characters_not_bytes() {
        let provider = ScriptedProvider::replying(Some("unused"));
        let generator = QuizGenerator::new(&provider, QuizSettings::default());

        let err = generator.generate_from_text(&"é".repeat(99)).await.unwrap_err();
        assert!(matches!(err, QuizError::EmptyPdf { chars: 99 }));

        generator.generate_from_text(&"é".repeat(100)).await.unwrap();
        assert!(provider.last.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn http_failure_maps_to_status_message() {
        let provider = ScriptedProvider::failing(500);
        let generator = QuizGenerator::new(&provider, QuizSettings::default());
        let err = generator.generate_from_text(&long_text()).await.unwrap_err();
        assert_eq!(err.user_message(), LLM_STATUS_MESSAGE);
    }

    #[tokio::test]
    async fn unreadable_pdf_maps_to_generic_failure() {
        let provider = ScriptedProvider::replying(Some("unused"));
        let generator = QuizGenerator::new(&provider, QuizSettings::default());
        let err = generator
            .generate(&FixedText(Err(())), Path::new("data/missing.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Pdf(PdfError::Open { .. })));
        assert_eq!(err.user_message(), QUIZ_FAILED_MESSAGE);
    }
}
