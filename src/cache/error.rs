use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
/// Errors returned by the semantic cache.
pub enum CacheError {
    /// Embedding generation failed.
    #[error("embedding generation failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Vector database error (search/upsert/collection).
    #[error("vector database error: {0}")]
    VectorDb(#[from] VectorDbError),

    /// A stored payload could not be decoded into a cached claim.
    #[error("failed to decode cached claim payload: {reason}")]
    PayloadDecode {
        /// Decode error message.
        reason: String,
    },
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
