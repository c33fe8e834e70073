//! OpenAI-compatible endpoint (LM Studio) provider implementation.

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nursebot_core::error::ProviderError;
use nursebot_core::model::ChatMessage;
use nursebot_core::traits::{CompletionRequest, CompletionResponse, EmbeddingRequest, LlmProvider};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:1234";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Provider for any server exposing `/v1/chat/completions`, such as LM Studio.
pub struct OpenAiCompatProvider {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    pub fn new(base_url: Option<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ProviderError::NetworkError(format!(
                "no server reachable at {}. Is LM Studio running with the local server started?",
                self.base_url
            ))
        } else {
            ProviderError::NetworkError(e.to_string())
        }
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError { status, message });
        }
        Ok(response)
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingBody<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingReply {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "lmstudio"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        let start = Instant::now();

        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
        };
        let response = self.post("/v1/chat/completions", &body).await?;

        let reply: ChatCompletionReply = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse completion: {e}"))
        })?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content);

        Ok(CompletionResponse {
            content,
            model: reply.model,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn embed(&self, request: &EmbeddingRequest) -> anyhow::Result<Vec<f32>> {
        let body = EmbeddingBody {
            model: &request.model,
            input: &request.input,
        };
        let response = self.post("/v1/embeddings", &body).await?;

        let reply: EmbeddingReply = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse embedding: {e}"))
        })?;

        reply
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| ProviderError::InvalidResponse("embedding response had no data".into()))
            .map_err(Into::into)
    }
}
