use thiserror::Error;

use crate::llm::LlmError;

#[derive(Debug, Error)]
/// Errors returned by the verdict synthesizer.
pub enum SynthesisError {
    /// The underlying LLM call failed.
    #[error("llm call failed: {0}")]
    Llm(#[from] LlmError),

    /// The completion decoded but is not a usable verdict.
    #[error("synthesized verdict violates schema: {reason}")]
    Schema {
        /// What was missing or wrong.
        reason: String,
    },
}

/// Convenience result type for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;
