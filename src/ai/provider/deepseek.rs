//! DeepSeek Backend
//!
//! DeepSeek exposes an OpenAI-compatible Chat Completions surface at its own
//! endpoint. The request is sent without JSON mode.

use async_trait::async_trait;
use tracing::{info, warn};

use super::openai::ChatCompletions;
use super::{ChatBackend, ProviderConfig};
use crate::types::{IntelError, Result};

const DEFAULT_API_BASE: &str = "https://api.deepseek.com/v1";

/// OpenAI-compatible backend at a custom endpoint
#[derive(Debug)]
pub struct DeepSeekBackend {
    inner: ChatCompletions,
}

impl DeepSeekBackend {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = Self::validate_endpoint(&api_base)?;

        Ok(Self {
            inner: ChatCompletions::new("deepseek", config, api_base, false)?,
        })
    }

    /// Only http/https endpoints are accepted; plain http is allowed for local
    /// gateways but logged.
    fn validate_endpoint(endpoint: &str) -> Result<String> {
        let url = url::Url::parse(endpoint).map_err(|e| {
            IntelError::Config(format!("Invalid DeepSeek endpoint URL '{}': {}", endpoint, e))
        })?;

        match url.scheme() {
            "https" => {}
            "http" => warn!("DeepSeek endpoint is not using https: {}", endpoint),
            other => {
                return Err(IntelError::Config(format!(
                    "DeepSeek endpoint must use http or https scheme, got: {}",
                    other
                )));
            }
        }

        let mut result = url.to_string();
        if result.ends_with('/') {
            result.pop();
        }
        Ok(result)
    }
}

#[async_trait]
impl ChatBackend for DeepSeekBackend {
    async fn chat(&self, prompt: &str) -> Result<String> {
        info!("Generating with DeepSeek (model: {})", self.inner.model());
        self.inner.complete(prompt).await
    }

    fn name(&self) -> &str {
        "deepseek"
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    #[test]
    fn test_default_endpoint() {
        let backend =
            DeepSeekBackend::new(&ProviderConfig::new("deepseek", "key", "deepseek-chat")).unwrap();
        assert_eq!(backend.inner.api_base(), DEFAULT_API_BASE);
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let config = ProviderConfig::new("deepseek", "key", "deepseek-chat")
            .with_api_base("ftp://api.deepseek.com/v1");
        assert!(matches!(
            DeepSeekBackend::new(&config),
            Err(IntelError::Config(_))
        ));

        let config =
            ProviderConfig::new("deepseek", "key", "deepseek-chat").with_api_base("not a url");
        assert!(DeepSeekBackend::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_chat_against_custom_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(|request: &Request| {
                let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                // OpenAI-compatible endpoint gets no JSON mode
                let status = if body.get("response_format").is_none() { 200 } else { 400 };
                ResponseTemplate::new(status).set_body_json(json!({
                    "choices": [{"message": {"content": "{}"}}]
                }))
            })
            .mount(&server)
            .await;

        let config = ProviderConfig::new("deepseek", "key", "deepseek-chat")
            .with_api_base(format!("{}/v1", server.uri()));
        let backend = DeepSeekBackend::new(&config).unwrap();
        assert_eq!(backend.chat("prompt").await.unwrap(), "{}");
    }
}
