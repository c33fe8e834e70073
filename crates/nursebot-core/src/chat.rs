//! Chat relay: forward user text to the completion endpoint and keep the
//! visible transcript.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::model::ChatMessage;
use crate::retrieval::ContextIndex;
use crate::traits::{CompletionRequest, LlmProvider};

/// System prompt for every chat request.
pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful nurse assistant. Use the KKH Information file to answer questions about women’s and children’s care.";

pub const THINKING_PLACEHOLDER: &str = "Thinking...";
pub const NO_RESPONSE_MESSAGE: &str = "Sorry, I could not get a response from the assistant.";
pub const CONNECTION_ERROR_MESSAGE: &str = "Error connecting to LM Studio. Is it running?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    You,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::You => write!(f, "You"),
            Sender::Bot => write!(f, "Bot"),
        }
    }
}

/// One line of the chat window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
    /// Set only on the "Thinking..." placeholder.
    #[serde(default)]
    pub pending: bool,
}

impl fmt::Display for ChatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender, self.text)
    }
}

/// The visible transcript, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ChatWindow {
    entries: Vec<ChatEntry>,
}

impl ChatWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.entries.push(ChatEntry {
            sender,
            text: text.into(),
            pending: false,
        });
    }

    /// Append the bot's "Thinking..." placeholder.
    pub fn show_pending(&mut self) {
        self.entries.push(ChatEntry {
            sender: Sender::Bot,
            text: THINKING_PLACEHOLDER.to_string(),
            pending: true,
        });
    }

    /// Remove the placeholder if it is the last entry.
    pub fn clear_pending(&mut self) -> bool {
        if self.entries.last().is_some_and(|e| e.pending) {
            self.entries.pop();
            true
        } else {
            false
        }
    }
}

/// Sends one two-message conversation per user input.
pub struct ChatRelay<'a> {
    provider: &'a dyn LlmProvider,
    model: String,
    context: Option<ContextIndex>,
}

impl<'a> ChatRelay<'a> {
    pub fn new(provider: &'a dyn LlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            context: None,
        }
    }

    /// Prefix each question with the most similar document chunk.
    pub fn with_context(mut self, index: ContextIndex) -> Self {
        self.context = Some(index);
        self
    }

    /// Relay `input` and record the exchange in `window`.
    ///
    /// Blank input is ignored. Returns the bot's entry otherwise.
    pub async fn send<'w>(&self, window: &'w mut ChatWindow, input: &str) -> Option<&'w ChatEntry> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        window.push(Sender::You, message);
        window.show_pending();

        let reply = match self.request_reply(message).await {
            Ok(Some(content)) => content,
            Ok(None) => NO_RESPONSE_MESSAGE.to_string(),
            Err(e) => {
                tracing::warn!("chat request failed: {e:#}");
                match e.downcast_ref::<ProviderError>() {
                    Some(ProviderError::ApiError { .. }) => NO_RESPONSE_MESSAGE.to_string(),
                    _ => CONNECTION_ERROR_MESSAGE.to_string(),
                }
            }
        };

        window.clear_pending();
        window.push(Sender::Bot, reply);
        window.last()
    }

    async fn request_reply(&self, message: &str) -> anyhow::Result<Option<String>> {
        let user_content = match &self.context {
            Some(index) => match index.retrieve(self.provider, message).await? {
                Some(chunk) => format!("Context: {chunk}\n\nQuestion: {message}"),
                None => message.to_string(),
            },
            None => message.to_string(),
        };

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(CHAT_SYSTEM_PROMPT),
                ChatMessage::user(user_content),
            ],
        };

        let response = self.provider.complete(&request).await?;
        tracing::debug!(latency_ms = response.latency_ms, "chat reply received");
        Ok(response.content)
    }
}
