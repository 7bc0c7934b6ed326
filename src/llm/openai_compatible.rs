//! OpenAI-compatible LLM provider implementation.
//!
//! Connects to any endpoint that implements the OpenAI Chat Completions API:
//! Groq, Azure OpenAI, or the OpenAI API itself. One provider instance per
//! configured endpoint.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::TierEndpointConfig;
use crate::error::LlmError;
use crate::llm::provider::LlmProvider;

/// OpenAI-compatible Chat Completions API provider.
pub struct OpenAiCompatibleProvider {
    name: String,
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl OpenAiCompatibleProvider {
    /// Create a provider for one endpoint.
    pub fn new(name: impl Into<String>, config: &TierEndpointConfig) -> Result<Self, LlmError> {
        let name = name.into();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| LlmError::RequestFailed {
                provider: name.clone(),
                reason: format!("Failed to build reqwest client: {e}"),
            })?;

        Ok(Self {
            name,
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Construct API URL for a given path.
    /// Uses the base_url as-is and appends `/v1/{path}`.
    /// Strips trailing `/v1` from base_url to avoid double `/v1` issues.
    fn api_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);
        format!("{}/v1/{}", base, path.trim_start_matches('/'))
    }

    /// Add Authorization header if an API key is configured.
    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key.expose_secret())),
            None => request,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let url = self.api_url("chat/completions");
        let body = ChatCompletionRequest {
            model,
            messages: vec![ChatCompletionMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(provider = %self.name, model, url, "dispatching completion request");

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        let request = self.add_auth_header(request);

        let response = request.send().await.map_err(|e| {
            tracing::error!(provider = %self.name, "completion request failed: {e}");
            LlmError::RequestFailed {
                provider: self.name.clone(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| LlmError::RequestFailed {
            provider: self.name.clone(),
            reason: format!("Response too large or failed to read: {e}"),
        })?;

        if !status.is_success() {
            if status.as_u16() == 401 {
                return Err(LlmError::AuthFailed {
                    provider: self.name.clone(),
                });
            }
            if status.as_u16() == 429 {
                return Err(LlmError::RateLimited {
                    provider: self.name.clone(),
                    retry_after: None,
                });
            }
            return Err(LlmError::RequestFailed {
                provider: self.name.clone(),
                reason: format!(
                    "HTTP {}: {}",
                    status,
                    &response_text[..response_text.len().min(200)]
                ),
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| LlmError::InvalidResponse {
                provider: self.name.clone(),
                reason: format!(
                    "JSON parse error: {}. Raw: {}",
                    e,
                    &response_text[..response_text.len().min(200)]
                ),
            })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: self.name.clone(),
                reason: "No choices in response".to_string(),
            })?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
