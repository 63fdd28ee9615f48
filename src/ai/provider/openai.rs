//! OpenAI API Backend
//!
//! Chat Completions request/response shapes. The `ChatCompletions` client is
//! shared with the OpenAI-compatible DeepSeek backend.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ChatBackend, ProviderConfig, build_http_client, normalize_base};
use crate::types::{ErrorCategory, ErrorClassifier, LlmError, Result};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Chat Completions client for any OpenAI-shaped endpoint
pub(super) struct ChatCompletions {
    /// Provider name reported in errors and logs
    provider: &'static str,
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    /// Ask for `response_format: json_object`
    json_mode: bool,
    client: reqwest::Client,
}

impl std::fmt::Debug for ChatCompletions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletions")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("json_mode", &self.json_mode)
            .finish()
    }
}

impl ChatCompletions {
    pub(super) fn new(
        provider: &'static str,
        config: &ProviderConfig,
        api_base: String,
        json_mode: bool,
    ) -> Result<Self> {
        let (_, api_key, model) = config.resolve()?;

        Ok(Self {
            provider,
            api_key: SecretString::from(api_key.to_string()),
            api_base: normalize_base(&api_base),
            model: model.to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            json_mode,
            client: build_http_client(config)?,
        })
    }

    pub(super) fn model(&self) -> &str {
        &self.model
    }

    #[cfg(test)]
    pub(super) fn api_base(&self) -> &str {
        &self.api_base
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
            response_format: self.json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }

    pub(super) async fn complete(&self, prompt: &str) -> Result<String> {
        let request = self.build_request(prompt);
        let url = format!("{}/chat/completions", self.api_base);

        debug!(provider = self.provider, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, self.provider))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("API error ({}): {}", status, body),
                self.provider,
            )
            .into());
        }

        let response_body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, self.provider))?;

        response_body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                LlmError::with_provider(
                    ErrorCategory::ParseError,
                    "No content in chat completion response",
                    self.provider,
                )
                .into()
            })
    }
}

/// OpenAI backend (Chat Completions with JSON mode)
#[derive(Debug)]
pub struct OpenAiBackend {
    inner: ChatCompletions,
}

impl OpenAiBackend {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            inner: ChatCompletions::new("openai", config, api_base, true)?,
        })
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn chat(&self, prompt: &str) -> Result<String> {
        info!("Generating with OpenAI (model: {})", self.inner.model());
        self.inner.complete(prompt).await
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntelError;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base: &str) -> ProviderConfig {
        ProviderConfig::new("openai", "sk-test", "gpt-4o").with_api_base(api_base)
    }

    #[test]
    fn test_request_uses_json_mode() {
        let backend = OpenAiBackend::new(&config("http://localhost")).unwrap();
        let request = serde_json::to_value(backend.inner.build_request("hello")).unwrap();
        assert_eq!(request["response_format"]["type"], "json_object");
        assert_eq!(request["messages"][0]["role"], "user");
        assert_eq!(request["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_default_api_base() {
        let backend = OpenAiBackend::new(&ProviderConfig::new("openai", "sk-test", "gpt-4o")).unwrap();
        assert_eq!(backend.inner.api_base(), DEFAULT_API_BASE);
    }

    #[tokio::test]
    async fn test_chat_extracts_message_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "gpt-4o"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"strengths\": [\"x\"]}"}}]
            })))
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(&config(&server.uri())).unwrap();
        let text = backend.chat("prompt").await.unwrap();
        assert_eq!(text, "{\"strengths\": [\"x\"]}");
    }

    #[tokio::test]
    async fn test_chat_maps_auth_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(&config(&server.uri())).unwrap();
        match backend.chat("prompt").await {
            Err(IntelError::Llm(err)) => assert_eq!(err.category, ErrorCategory::Auth),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chat_without_choices_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(&config(&server.uri())).unwrap();
        assert!(backend.chat("prompt").await.is_err());
    }
}
