//! Core trait definitions for completion endpoints and text extractors.
//!
//! `LlmProvider` is implemented by the `nursebot-providers` crate and
//! `TextExtractor` by `nursebot-pdf`.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PdfError;
use crate::model::ChatMessage;

// ---------------------------------------------------------------------------
// LLM Provider trait
// ---------------------------------------------------------------------------

/// Trait for chat-style text-generation backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "lmstudio").
    fn name(&self) -> &str;

    /// Send one conversation and return the first choice.
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse>;

    /// Embed a single input string.
    async fn embed(&self, request: &EmbeddingRequest) -> anyhow::Result<Vec<f32>>;
}

/// Request body for a chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (e.g. "tinyllama-1.1b-chat-v1").
    pub model: String,
    /// Conversation, oldest first.
    pub messages: Vec<ChatMessage>,
}

/// Reply from a completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Content of the first choice, or `None` when the endpoint returned no
    /// usable choice.
    pub content: Option<String>,
    /// Model that actually answered, when reported.
    pub model: Option<String>,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Request body for an embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: String,
}

// ---------------------------------------------------------------------------
// Text extraction trait
// ---------------------------------------------------------------------------

/// Trait for document backends that turn a file into plain text.
///
/// Implementations are synchronous; PDF engines are generally not safe to
/// drive from async tasks.
pub trait TextExtractor {
    /// Extract the whole document as text, one line per page.
    fn extract_text(&self, path: &Path) -> Result<String, PdfError>;
}
