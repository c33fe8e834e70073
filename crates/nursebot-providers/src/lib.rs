//! nursebot-providers: local LLM endpoint integrations.
//!
//! Implements the `LlmProvider` trait for OpenAI-compatible servers (LM
//! Studio) and Ollama, and loads the nursebot configuration file.

pub mod config;
pub mod ollama;
pub mod openai;

pub use config::{create_provider, load_config_from, NursebotConfig, ProviderConfig};
pub use nursebot_core::error::ProviderError;
