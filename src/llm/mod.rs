//! LLM dispatch for the routed question.
//!
//! The tier dispatcher owns one provider client and one provider model
//! identifier per tier, built once from configuration at startup. Dispatch
//! is a single attempt against the chosen tier's endpoint.

mod openai_compatible;
mod provider;

pub use openai_compatible::OpenAiCompatibleProvider;
pub use provider::LlmProvider;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::routing::Tier;

/// A tier's provider client and the model identifier it serves.
#[derive(Clone)]
pub struct TierEndpoint {
    pub model: String,
    pub provider: Arc<dyn LlmProvider>,
}

/// Fixed mapping from tier to provider endpoint.
pub struct TierDispatcher {
    endpoints: HashMap<Tier, TierEndpoint>,
}

impl TierDispatcher {
    /// Build a dispatcher from explicit endpoints. Used directly by tests;
    /// production goes through [`TierDispatcher::from_config`].
    pub fn new(endpoints: HashMap<Tier, TierEndpoint>) -> Self {
        Self { endpoints }
    }

    /// Build one OpenAI-compatible provider per tier from configuration.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let mut endpoints = HashMap::new();
        for tier in Tier::CHEAPEST_FIRST {
            let endpoint = config.endpoint(tier);
            let provider = OpenAiCompatibleProvider::new(tier.as_str(), endpoint)?;
            endpoints.insert(
                tier,
                TierEndpoint {
                    model: endpoint.model.clone(),
                    provider: Arc::new(provider),
                },
            );
        }
        Ok(Self { endpoints })
    }

    fn endpoint(&self, tier: Tier) -> Result<&TierEndpoint, LlmError> {
        self.endpoints
            .get(&tier)
            .ok_or_else(|| LlmError::TierNotConfigured {
                tier: tier.as_str().to_string(),
            })
    }

    /// Provider model identifier served at a tier.
    pub fn model_for(&self, tier: Tier) -> Result<&str, LlmError> {
        Ok(self.endpoint(tier)?.model.as_str())
    }

    /// Execute one dispatch attempt against the tier's endpoint.
    pub async fn dispatch(&self, tier: Tier, prompt: &str) -> Result<String, LlmError> {
        let endpoint = self.endpoint(tier)?;
        tracing::info!(
            tier = tier.as_str(),
            model = endpoint.model,
            provider = endpoint.provider.name(),
            "dispatching question"
        );
        endpoint.provider.complete(&endpoint.model, prompt).await
    }
}
