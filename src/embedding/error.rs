use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the embedding service.
pub enum EmbeddingError {
    /// Transport-level request failure.
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status from the provider.
    #[error("embedding api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed embedding response: {reason}")]
    MalformedResponse {
        /// What was wrong.
        reason: String,
    },

    /// The provider returned a vector of an unexpected dimension.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Configured dimension.
        expected: usize,
        /// Dimension actually returned.
        actual: usize,
    },
}
