//! Ollama (local LLM) provider implementation.

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nursebot_core::error::ProviderError;
use nursebot_core::model::ChatMessage;
use nursebot_core::traits::{CompletionRequest, CompletionResponse, EmbeddingRequest, LlmProvider};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 300; // Local models are slower

/// Ollama local LLM provider.
pub struct OllamaProvider {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    fn not_reachable(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ProviderError::NetworkError(format!(
                "Ollama not reachable at {}. Is it running? Start with: ollama serve",
                self.base_url
            ))
        } else {
            ProviderError::NetworkError(e.to_string())
        }
    }
}

#[derive(Serialize)]
struct OllamaChatBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaChatReply {
    #[serde(default)]
    message: Option<OllamaReplyMessage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct OllamaReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct OllamaEmbedBody<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct OllamaEmbedReply {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        let start = Instant::now();

        let body = OllamaChatBody {
            model: &request.model,
            messages: &request.messages,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.not_reachable(e))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(ProviderError::ModelNotFound(format!(
                "Model '{}' not found locally. Pull it with: ollama pull {}",
                request.model, request.model
            ))
            .into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let reply: OllamaChatReply = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse response: {e}"))
        })?;

        Ok(CompletionResponse {
            content: reply.message.and_then(|m| m.content),
            model: reply.model,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn embed(&self, request: &EmbeddingRequest) -> anyhow::Result<Vec<f32>> {
        let body = OllamaEmbedBody {
            model: &request.model,
            input: &request.input,
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.not_reachable(e))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError { status, message }.into());
        }

        let reply: OllamaEmbedReply = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse embed response: {e}"))
        })?;

        reply
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("no embeddings returned".into()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.into(),
            messages: vec![ChatMessage::user("What is a normal temperature?")],
        }
    }

    #[tokio::test]
    async fn successful_completion() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "message": {"role": "assistant", "content": "Around 36.5 to 37.5 degrees."},
            "model": "tinyllama"
        });

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({"stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&server.uri(), None).unwrap();
        let response = provider.complete(&request("tinyllama")).await.unwrap();
        assert_eq!(
            response.content.as_deref(),
            Some("Around 36.5 to 37.5 degrees.")
        );
    }

    #[tokio::test]
    async fn model_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&server.uri(), None).unwrap();
        let err = provider.complete(&request("nonexistent")).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert_eq!(
            err.downcast_ref::<ProviderError>().and_then(ProviderError::status),
            Some(404)
        );
    }

    #[tokio::test]
    async fn embedding() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/embed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "all-minilm",
                "embeddings": [[0.5, 0.5]]
            })))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&server.uri(), None).unwrap();
        let embedding = provider
            .embed(&EmbeddingRequest {
                model: "all-minilm".into(),
                input: "hello".into(),
            })
            .await
            .unwrap();
        assert_eq!(embedding, vec![0.5, 0.5]);
    }
}
