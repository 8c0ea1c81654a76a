//! Sentence embedding service.
//!
//! The semantic cache owns the only embedding consumer. [`OpenAiEmbedder`]
//! calls the embeddings REST endpoint; [`StubEmbedder`] produces
//! deterministic vectors (optionally pinned per input) so tests can script
//! exact similarities without a network.

pub mod error;
pub mod openai;
#[cfg(any(test, feature = "mock"))]
pub mod stub;

pub use error::EmbeddingError;
pub use openai::OpenAiEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use stub::StubEmbedder;

use async_trait::async_trait;

/// Default dimension of `text-embedding-3-small` vectors.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Text-to-vector interface used by the semantic cache.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds `text` into a vector of [`Embedder::dim`] floats.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Dimension of vectors produced by this embedder.
    fn dim(&self) -> usize;
}
