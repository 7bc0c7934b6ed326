//! Topic classification for incoming questions.
//!
//! The classifier itself is externally trained and served; the core only
//! sees the `CategoryClassifier` trait and uses the returned label as an
//! opaque routing key. The production implementation is an HTTP client for
//! the classification sidecar.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;

/// Trait for category classifiers.
#[async_trait]
pub trait CategoryClassifier: Send + Sync {
    /// Classify question text into a topic category.
    ///
    /// Only the question text is classified; answer options never reach the
    /// classifier.
    async fn classify(&self, text: &str) -> Result<String, ClassifierError>;
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    category: String,
}

/// HTTP client for the classification sidecar.
pub struct HttpClassifier {
    client: Client,
    base_url: String,
}

impl HttpClassifier {
    /// Create a classifier client from configuration.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifierError::RequestFailed {
                reason: format!("Failed to build reqwest client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CategoryClassifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<String, ClassifierError> {
        let url = format!("{}/classify", self.base_url);

        tracing::debug!(url, "requesting category classification");

        let response = self
            .client
            .post(&url)
            .json(&ClassifyRequest { text })
            .send()
            .await
            .map_err(|e| ClassifierError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::RequestFailed {
                reason: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            return Err(ClassifierError::RequestFailed {
                reason: format!("HTTP {}: {}", status, &body[..body.len().min(200)]),
            });
        }

        let parsed: ClassifyResponse =
            serde_json::from_str(&body).map_err(|e| ClassifierError::InvalidResponse {
                reason: format!("JSON parse error: {e}"),
            })?;

        if parsed.category.is_empty() {
            return Err(ClassifierError::InvalidResponse {
                reason: "empty category".to_string(),
            });
        }

        Ok(parsed.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let config = ClassifierConfig {
            base_url: "http://localhost:9000/".to_string(),
            timeout_secs: 5,
        };
        let classifier = HttpClassifier::new(&config).unwrap();
        assert_eq!(classifier.base_url, "http://localhost:9000");
    }

    #[test]
    fn classify_response_parses() {
        let parsed: ClassifyResponse =
            serde_json::from_str(r#"{"category": "History"}"#).unwrap();
        assert_eq!(parsed.category, "History");
    }
}
