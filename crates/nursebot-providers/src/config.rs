//! Configuration loading and provider factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use nursebot_core::quiz::QuizSettings;
use nursebot_core::retrieval::DEFAULT_CHUNK_WORDS;
use nursebot_core::traits::LlmProvider;

use crate::ollama::OllamaProvider;
use crate::openai::{OpenAiCompatProvider, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding the default provider's base URL.
pub const BASE_URL_ENV: &str = "NURSEBOT_BASE_URL";

/// Configuration for a single completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// Any OpenAI-compatible server; LM Studio by default.
    #[serde(alias = "openai")]
    LmStudio {
        #[serde(default = "default_lmstudio_url")]
        base_url: String,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
}

impl ProviderConfig {
    fn base_url_mut(&mut self) -> &mut String {
        match self {
            ProviderConfig::LmStudio { base_url } | ProviderConfig::Ollama { base_url } => base_url,
        }
    }
}

fn default_lmstudio_url() -> String {
    crate::openai::DEFAULT_BASE_URL.to_string()
}

fn default_ollama_url() -> String {
    crate::ollama::DEFAULT_BASE_URL.to_string()
}

/// Where the quiz PDF lives and how to reach the PDF engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// The document quizzes and chat context are drawn from.
    #[serde(default = "default_pdf_path")]
    pub path: PathBuf,
    /// Directory holding the PDFium shared library. Falls back to the
    /// system library search path when unset.
    #[serde(default)]
    pub library_dir: Option<PathBuf>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            path: default_pdf_path(),
            library_dir: None,
        }
    }
}

fn default_pdf_path() -> PathBuf {
    PathBuf::from("data").join("KKH Information file.pdf")
}

/// Quiz generation knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
    #[serde(default = "default_min_pdf_chars")]
    pub min_pdf_chars: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            excerpt_chars: default_excerpt_chars(),
            min_pdf_chars: default_min_pdf_chars(),
        }
    }
}

fn default_question_count() -> usize {
    3
}
fn default_excerpt_chars() -> usize {
    2000
}
fn default_min_pdf_chars() -> usize {
    100
}

/// Top-level nursebot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NursebotConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Provider used when none is named on the command line.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Model for chat and quiz generation.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Model for context-retrieval embeddings.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Words per context chunk.
    #[serde(default = "default_chunk_words")]
    pub chunk_words: usize,
    #[serde(default)]
    pub pdf: PdfConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
}

fn default_provider() -> String {
    "lmstudio".to_string()
}
fn default_chat_model() -> String {
    "tinyllama-1.1b-chat-v1".to_string()
}
fn default_embedding_model() -> String {
    "paraphrase-MiniLM-L3-v2".to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_chunk_words() -> usize {
    DEFAULT_CHUNK_WORDS
}

impl Default for NursebotConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            request_timeout_secs: default_timeout(),
            chunk_words: default_chunk_words(),
            pdf: PdfConfig::default(),
            quiz: QuizConfig::default(),
        }
    }
}

impl NursebotConfig {
    /// Settings for the quiz generator.
    pub fn quiz_settings(&self) -> QuizSettings {
        QuizSettings {
            model: self.chat_model.clone(),
            question_count: self.quiz.question_count,
            excerpt_chars: self.quiz.excerpt_chars,
            min_pdf_chars: self.quiz.min_pdf_chars,
        }
    }

    /// Look up a provider by name, or the default provider.
    ///
    /// The names `lmstudio` and `ollama` resolve to built-in defaults when
    /// they are not configured explicitly.
    pub fn provider_config(&self, name: Option<&str>) -> Result<ProviderConfig> {
        let name = name.unwrap_or(&self.default_provider);
        if let Some(config) = self.providers.get(name) {
            return Ok(config.clone());
        }
        match name {
            "lmstudio" => Ok(ProviderConfig::LmStudio {
                base_url: default_lmstudio_url(),
            }),
            "ollama" => Ok(ProviderConfig::Ollama {
                base_url: default_ollama_url(),
            }),
            other => anyhow::bail!(
                "provider '{}' not found in config. Available: {:?}",
                other,
                self.providers.keys().collect::<Vec<_>>()
            ),
        }
    }

    /// Build the named provider, or the default one.
    pub fn create_provider(&self, name: Option<&str>) -> Result<Box<dyn LlmProvider>> {
        let config = self.provider_config(name)?;
        create_provider(&config, self.request_timeout_secs)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order:
/// 1. `nursebot.toml` in the current directory
/// 2. `~/.config/nursebot/config.toml`
///
/// Environment variable override: `NURSEBOT_BASE_URL`.
pub fn load_config_from(path: Option<&Path>) -> Result<NursebotConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("nursebot.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => NursebotConfig::default(),
    };

    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        let name = config.default_provider.clone();
        let mut provider = config.provider_config(Some(&name))?;
        *provider.base_url_mut() = url;
        config.providers.insert(name, provider);
    }

    Ok(config)
}

/// Parse a TOML config string and resolve `${VAR}` references.
pub fn parse_config(content: &str) -> Result<NursebotConfig> {
    let mut config: NursebotConfig = toml::from_str(content)?;
    for provider in config.providers.values_mut() {
        let url = provider.base_url_mut();
        *url = resolve_env_vars(url);
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("nursebot"))
}

/// Create a provider instance from its configuration.
pub fn create_provider(config: &ProviderConfig, timeout_secs: u64) -> Result<Box<dyn LlmProvider>> {
    match config {
        ProviderConfig::LmStudio { base_url } => Ok(Box::new(OpenAiCompatProvider::new(
            Some(base_url.clone()),
            timeout_secs,
        )?)),
        ProviderConfig::Ollama { base_url } => {
            Ok(Box::new(OllamaProvider::new(base_url, Some(timeout_secs))?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_NURSEBOT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_NURSEBOT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_NURSEBOT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_NURSEBOT_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = NursebotConfig::default();
        assert_eq!(config.default_provider, "lmstudio");
        assert_eq!(config.chat_model, "tinyllama-1.1b-chat-v1");
        assert_eq!(config.pdf.path, PathBuf::from("data/KKH Information file.pdf"));
        let settings = config.quiz_settings();
        assert_eq!(settings.question_count, 3);
        assert_eq!(settings.excerpt_chars, 2000);
        assert_eq!(settings.min_pdf_chars, 100);
    }

    #[test]
    fn parse_provider_config() {
        let toml_str = r#"
default_provider = "ward"
chat_model = "llama3"

[providers.ward]
type = "lmstudio"
base_url = "http://192.168.75.1:1234"

[providers.legacy]
type = "openai"

[providers.ollama]
type = "ollama"

[pdf]
path = "docs/guide.pdf"
library_dir = "/opt/pdfium/lib"

[quiz]
question_count = 5
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.providers.len(), 3);
        assert_eq!(
            config.provider_config(None).unwrap(),
            ProviderConfig::LmStudio {
                base_url: "http://192.168.75.1:1234".into()
            }
        );
        assert_eq!(
            config.providers["legacy"],
            ProviderConfig::LmStudio {
                base_url: "http://127.0.0.1:1234".into()
            }
        );
        assert_eq!(
            config.providers["ollama"],
            ProviderConfig::Ollama {
                base_url: "http://localhost:11434".into()
            }
        );
        assert_eq!(config.pdf.library_dir, Some(PathBuf::from("/opt/pdfium/lib")));
        assert_eq!(config.quiz.question_count, 5);
        assert_eq!(config.quiz.excerpt_chars, 2000);
    }

    #[test]
    fn builtin_provider_names_resolve() {
        let config = NursebotConfig::default();
        assert!(matches!(
            config.provider_config(None).unwrap(),
            ProviderConfig::LmStudio { .. }
        ));
        assert!(matches!(
            config.provider_config(Some("ollama")).unwrap(),
            ProviderConfig::Ollama { .. }
        ));
        assert!(config.provider_config(Some("cloud")).is_err());
    }

    #[test]
    fn provider_base_url_resolves_env() {
        std::env::set_var("_NURSEBOT_TEST_HOST", "10.0.0.7");
        let config = parse_config(
            r#"
[providers.lmstudio]
type = "lmstudio"
base_url = "http://${_NURSEBOT_TEST_HOST}:1234"
"#,
        )
        .unwrap();
        std::env::remove_var("_NURSEBOT_TEST_HOST");
        assert_eq!(
            config.providers["lmstudio"],
            ProviderConfig::LmStudio {
                base_url: "http://10.0.0.7:1234".into()
            }
        );
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nursebot.toml");
        std::fs::write(&path, "chat_model = \"phi-3\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.chat_model, "phi-3");

        assert!(load_config_from(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn create_named_provider() {
        let config = NursebotConfig::default();
        let provider = config.create_provider(Some("ollama")).unwrap();
        assert_eq!(provider.name(), "ollama");
        let provider = config.create_provider(None).unwrap();
        assert_eq!(provider.name(), "lmstudio");
    }
}
