use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by search backends.
pub enum SearchError {
    /// HTTP transport or body decode failure.
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The search API returned a non-success status.
    #[error("search API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        message: String,
    },

    /// The response decoded but did not carry the expected shape.
    #[error("malformed search response: {reason}")]
    MalformedResponse {
        /// What was missing or wrong.
        reason: String,
    },
}

/// Convenience result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
