//! LLM provider trait.

use async_trait::async_trait;

use crate::error::LlmError;

/// Trait for downstream LLM providers.
///
/// One dispatch attempt per call: no retries, no caching, no inspection of
/// the answer. Failures surface to the caller as-is.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a single-turn prompt to the given model and return the answer
    /// text unchanged.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, LlmError>;

    /// Provider name for logs and error messages.
    fn name(&self) -> &str;
}
