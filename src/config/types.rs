//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/rivalscope/) and project (.rivalscope/) level configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ai::{ProviderConfig, ProviderKind, ProviderRegistry};
use crate::constants::{discovery, llm, report};
use crate::discovery::EnricherConfig;
use crate::types::{IntelError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider settings
    pub llm: LlmConfig,

    /// Competitor discovery settings
    pub discovery: DiscoveryConfig,

    /// Report output settings
    pub report: ReportConfig,
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `IntelError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(IntelError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(IntelError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.discovery.competitor_count == 0 {
            return Err(IntelError::Config(
                "Discovery competitor_count must be greater than 0".to_string(),
            ));
        }

        if self.discovery.concurrency == 0 {
            return Err(IntelError::Config(
                "Discovery concurrency must be greater than 0".to_string(),
            ));
        }

        if self.discovery.crawl_timeout_secs == 0 {
            return Err(IntelError::Config(
                "Discovery crawl_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.report.truncate_chars == 0 {
            return Err(IntelError::Config(
                "Report truncate_chars must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: openai, anthropic, google, deepseek
    pub provider: String,

    /// Model id; the provider's first catalog model when unset
    pub model: Option<String>,

    /// API key; falls back to the provider's environment variable
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL override (OpenAI-compatible endpoints)
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for LLM generation
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: usize,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
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

impl Default for LlmConfig {
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

impl LlmConfig {
    /// Model to use: configured id, else the provider's default
    pub fn effective_model(&self) -> Option<String> {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| ProviderRegistry::default_model(&self.provider).map(str::to_string))
    }

    /// Backend configuration, resolving the API key from the environment
    pub fn to_provider_config(&self) -> ProviderConfig {
        self.to_provider_config_with(|name| std::env::var(name).ok())
    }

    /// Backend configuration with an explicit environment lookup
    pub fn to_provider_config_with(&self, env: impl Fn(&str) -> Option<String>) -> ProviderConfig {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.provider
                    .parse::<ProviderKind>()
                    .ok()
                    .and_then(|kind| env(kind.api_key_env()))
            });

        ProviderConfig {
            provider: self.provider.clone(),
            model: self.effective_model(),
            api_key,
            api_base: self.api_base.clone(),
            timeout_secs: self.timeout_secs,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

// =============================================================================
// Discovery Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Competitors requested from search
    pub competitor_count: usize,

    /// Per-call crawl/search timeout in seconds
    pub crawl_timeout_secs: u64,

    /// Crawls in flight at once (1 = sequential)
    pub concurrency: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            competitor_count: discovery::DEFAULT_COMPETITOR_COUNT,
            crawl_timeout_secs: discovery::CRAWL_TIMEOUT_SECS,
            concurrency: discovery::DEFAULT_CONCURRENCY,
        }
    }
}

impl DiscoveryConfig {
    pub fn to_enricher_config(&self) -> EnricherConfig {
        EnricherConfig {
            competitor_count: self.competitor_count,
            crawl_timeout: Duration::from_secs(self.crawl_timeout_secs),
            concurrency: self.concurrency,
        }
    }
}

// =============================================================================
// Report Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Characters kept in description/summary cells
    pub truncate_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            truncate_chars: report::TRUNCATE_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.discovery.competitor_count, 5);
        assert_eq!(config.discovery.concurrency, 1);
        assert_eq!(config.report.truncate_chars, 100);
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let mut config = Config::default();
        config.llm.temperature = 2.5;
        assert!(matches!(config.validate(), Err(IntelError::Config(_))));

        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.discovery.competitor_count = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.discovery.concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.report.truncate_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_model_defaults_per_provider() {
        let mut llm = LlmConfig::default();
        assert_eq!(llm.effective_model().as_deref(), Some("gpt-4o"));

        llm.provider = "deepseek".to_string();
        assert_eq!(llm.effective_model().as_deref(), Some("deepseek-chat"));

        llm.model = Some("deepseek-coder".to_string());
        assert_eq!(llm.effective_model().as_deref(), Some("deepseek-coder"));

        llm.provider = "unknown".to_string();
        llm.model = None;
        assert_eq!(llm.effective_model(), None);
    }

    #[test]
    fn test_api_key_falls_back_to_env() {
        let llm = LlmConfig {
            provider: "anthropic".to_string(),
            ..Default::default()
        };
        let provider = llm.to_provider_config_with(|name| {
            (name == "ANTHROPIC_API_KEY").then(|| "from-env".to_string())
        });
        assert_eq!(provider.api_key.as_deref(), Some("from-env"));
        assert_eq!(provider.model.as_deref(), Some("claude-3-opus-20240229"));
    }

    #[test]
    fn test_configured_key_wins_over_env() {
        let llm = LlmConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        let provider = llm.to_provider_config_with(|_| Some("from-env".to_string()));
        assert_eq!(provider.api_key.as_deref(), Some("from-config"));
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-secret".to_string());

        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(!toml.contains("sk-secret"));
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }
}
