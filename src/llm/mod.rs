//! Schema-constrained LLM completion service.
//!
//! The relevance filter and verdict synthesizer both talk to the LLM through
//! [`LlmService`]. Structured calls carry a strict JSON schema; a response
//! that does not decode as JSON (or that the provider refuses) surfaces as an
//! explicit [`LlmError`] rather than being silently coerced.
//!
//! The production implementation is [`OpenAiLlm`], a plain REST client.
//! Callers must not assume determinism: the same prompt may produce different
//! output, so idempotence lives in the cache layer, never here.

pub mod error;
pub mod openai;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::LlmError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockLlmService;
pub use openai::OpenAiLlm;

use async_trait::async_trait;
use serde_json::Value;

/// A named JSON schema the completion must conform to.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    /// Schema name reported to the provider.
    pub name: &'static str,
    /// JSON schema body (`type: object`, `additionalProperties: false`).
    pub schema: Value,
}

/// Chat-completion interface used by the pipeline.
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Runs a completion constrained to `schema` and returns the decoded
    /// JSON object.
    async fn complete_structured(
        &self,
        system: &str,
        user: &str,
        schema: &ResponseSchema,
    ) -> Result<Value, LlmError>;

    /// Runs a free-text completion.
    async fn complete_text(&self, system: &str, user: &str) -> Result<String, LlmError>;
}
