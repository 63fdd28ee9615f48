//! LLM Backend Abstraction
//!
//! Defines the `ChatBackend` trait: one prompt in, raw model text out.
//! Each supported provider speaks a different wire protocol; the adapters in
//! this module hide those shapes behind the same call.
//!
//! ## Adapters
//!
//! - `openai`: Chat Completions (`choices[0].message.content`)
//! - `anthropic`: Messages API (`content[0].text`)
//! - `gemini`: generateContent (`candidates[0].content.parts[0].text`)
//! - `deepseek`: OpenAI-compatible Chat Completions at a custom endpoint
//!
//! `create_backend` is the only place that branches on the provider.

mod anthropic;
mod deepseek;
mod gemini;
mod openai;

pub use anthropic::AnthropicBackend;
pub use deepseek::DeepSeekBackend;
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::llm;
use crate::types::{IntelError, Result};

// =============================================================================
// Provider Kind
// =============================================================================

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Google,
    DeepSeek,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Google,
        ProviderKind::DeepSeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Environment variable consulted when no API key is configured
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GOOGLE_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" | "gemini" => Ok(Self::Google),
            "deepseek" => Ok(Self::DeepSeek),
            other => Err(format!(
                "Unknown provider: {}. Supported: openai, anthropic, google, deepseek",
                other
            )),
        }
    }
}

// =============================================================================
// Provider Configuration
// =============================================================================

/// Configuration for one analysis session's backend
///
/// API keys are never serialized and are redacted in debug output. Adapters
/// move the key into a `SecretString` on construction.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider identifier: "openai", "anthropic", "google", "deepseek"
    pub provider: String,
    /// Model identifier (provider-specific)
    pub model: Option<String>,
    /// API key, never serialized
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL override
    #[serde(default)]
    pub api_base: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: usize,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: llm::DEFAULT_PROVIDER.to_string(),
            model: None,
            api_key: None,
            api_base: None,
            timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
        }
    }
}

impl ProviderConfig {
    pub fn new(provider: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            api_key: Some(api_key.into()),
            model: Some(model.into()),
            ..Default::default()
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that provider, key and model are all usable.
    ///
    /// Returns the parsed provider, key and model on success; the error text
    /// explains which field is missing.
    pub fn resolve(&self) -> Result<(ProviderKind, &str, &str)> {
        let kind = ProviderKind::from_str(&self.provider).map_err(IntelError::BackendUnconfigured)?;

        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                IntelError::BackendUnconfigured(format!(
                    "{} API key not found. Set {} or provide it in config",
                    kind,
                    kind.api_key_env()
                ))
            })?;

        let model = self
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| {
                IntelError::BackendUnconfigured(format!("No model selected for provider: {}", kind))
            })?;

        Ok((kind, api_key, model))
    }
}

// =============================================================================
// Chat Backend Trait
// =============================================================================

/// Shared backend handle
pub type SharedBackend = Arc<dyn ChatBackend>;

/// One LLM backend: sends a single user prompt, returns the raw reply text
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the prompt and return the model's text output unmodified
    async fn chat(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier in use
    fn model(&self) -> &str;
}

/// Create a backend adapter from configuration
pub fn create_backend(config: &ProviderConfig) -> Result<SharedBackend> {
    let (kind, _, _) = config.resolve()?;

    match kind {
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiBackend::new(config)?)),
        ProviderKind::Anthropic => Ok(Arc::new(AnthropicBackend::new(config)?)),
        ProviderKind::Google => Ok(Arc::new(GeminiBackend::new(config)?)),
        ProviderKind::DeepSeek => Ok(Arc::new(DeepSeekBackend::new(config)?)),
    }
}

/// Build the HTTP client shared by all adapters
fn build_http_client(config: &ProviderConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| IntelError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Strip a trailing slash so paths can be appended with `format!`
fn normalize_base(api_base: &str) -> String {
    api_base.trim_end_matches('/').to_string()
}
