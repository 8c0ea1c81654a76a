//! Deterministic stub embedder.
//!
//! Produces stable, non-semantic vectors derived from a BLAKE3 hash of the
//! input, so the cache machinery can run without a network. Tests that need
//! exact geometry can pin a vector per input text.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{Embedder, error::EmbeddingError};
use crate::hashing::hash_sentence;

/// Default dimension of stub vectors.
pub const STUB_EMBEDDING_DIM: usize = 8;

/// Hash-derived embedder with optional pinned vectors.
#[derive(Debug, Default)]
pub struct StubEmbedder {
    pinned: Mutex<HashMap<String, Vec<f32>>>,
    dim: usize,
}

impl StubEmbedder {
    pub fn new() -> Self {
        Self::with_dim(STUB_EMBEDDING_DIM)
    }

    pub fn with_dim(dim: usize) -> Self {
        Self {
            pinned: Mutex::new(HashMap::new()),
            dim,
        }
    }

    /// Pins an exact vector for `text`. The vector must match [`Embedder::dim`].
    pub fn pin(&self, text: &str, vector: Vec<f32>) {
        assert_eq!(vector.len(), self.dim, "pinned vector has wrong dimension");
        self.pinned.lock().unwrap().insert(text.to_string(), vector);
    }

    /// Deterministic unit vector derived from the hash of `text`.
    fn derive(&self, text: &str) -> Vec<f32> {
        let hash = hash_sentence(text);
        let mut vector: Vec<f32> = (0..self.dim)
            .map(|i| {
                let byte = hash[i % hash.len()];
                // Spread bytes over [-1, 1].
                (byte as f32 / 127.5) - 1.0
            })
            .collect();

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait::async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Some(vector) = self.pinned.lock().unwrap().get(text) {
            return Ok(vector.clone());
        }
        Ok(self.derive(text))
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
