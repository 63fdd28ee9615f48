//! Anthropic Messages API Backend

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ChatBackend, ProviderConfig, build_http_client, normalize_base};
use crate::types::{ErrorCategory, ErrorClassifier, LlmError, Result};

const DEFAULT_API_BASE: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic backend with secure API key handling
pub struct AnthropicBackend {
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for AnthropicBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicBackend")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl AnthropicBackend {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let (_, api_key, model) = config.resolve()?;

        let api_base = config
            .api_base
            .as_deref()
            .map(normalize_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key: SecretString::from(api_key.to_string()),
            api_base,
            model: model.to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client: build_http_client(config)?,
        })
    }

    fn build_request(&self, prompt: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

#[async_trait]
impl ChatBackend for AnthropicBackend {
    async fn chat(&self, prompt: &str) -> Result<String> {
        info!("Generating with Anthropic (model: {})", self.model);

        let request = self.build_request(prompt);
        let url = format!("{}/messages", self.api_base);

        debug!("Sending request to Anthropic Messages API");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, "anthropic"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("Anthropic API error ({}): {}", status, body),
                "anthropic",
            )
            .into());
        }

        let response_body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, "anthropic"))?;

        response_body
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| {
                LlmError::with_provider(
                    ErrorCategory::ParseError,
                    "No text block in Anthropic response",
                    "anthropic",
                )
                .into()
            })
    }

    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: usize,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_request_shape() {
        let backend = AnthropicBackend::new(&ProviderConfig::new(
            "anthropic",
            "sk-ant-test",
            "claude-3-haiku-20240307",
        ))
        .unwrap();
        let request = serde_json::to_value(backend.build_request("hello")).unwrap();
        assert_eq!(request["max_tokens"], 3072);
        assert_eq!(request["messages"][0]["content"], "hello");
        assert!(request.get("system").is_none());
    }

    #[tokio::test]
    async fn test_chat_reads_first_text_block() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({"model": "claude-3-haiku-20240307"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "{\"weaknesses\": [\"y\"]}"}]
            })))
            .mount(&server)
            .await;

        let config = ProviderConfig::new("anthropic", "sk-ant-test", "claude-3-haiku-20240307")
            .with_api_base(server.uri());
        let backend = AnthropicBackend::new(&config).unwrap();
        assert_eq!(backend.chat("prompt").await.unwrap(), "{\"weaknesses\": [\"y\"]}");
    }

    #[tokio::test]
    async fn test_chat_maps_overload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let config = ProviderConfig::new("anthropic", "sk-ant-test", "claude-3-haiku-20240307")
            .with_api_base(server.uri());
        let backend = AnthropicBackend::new(&config).unwrap();
        let err = backend.chat("prompt").await.unwrap_err();
        assert!(err.is_backend_failure());
    }
}
