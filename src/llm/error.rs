use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the LLM service.
pub enum LlmError {
    /// Transport-level request failure.
    #[error("llm request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status from the provider.
    #[error("llm api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        message: String,
    },

    /// The provider refused to answer (safety refusal).
    #[error("llm refused to answer: {reason}")]
    Refusal {
        /// Refusal text from the provider.
        reason: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed llm response: {reason}")]
    MalformedResponse {
        /// What was wrong.
        reason: String,
    },

    /// Structured output failed schema-side validation.
    #[error("llm output violated the response schema: {reason}")]
    SchemaViolation {
        /// What was wrong.
        reason: String,
    },
}

/// Convenience result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;
