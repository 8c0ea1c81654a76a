//! Semantic claim cache.
//!
//! The cache is the single source of truth for "have we already paid the
//! cost of verifying something like this". It is consulted before any
//! evidence gathering or LLM call:
//!
//! 1. an exact-match L1 layer keyed by the BLAKE3 hash of the sentence, and
//! 2. a vector index of sentence embeddings, where two claims count as the
//!    same once `similarity = 1 / (1 + distance)` reaches the configured
//!    threshold.
//!
//! Entries are created on first successful verification and never mutated.
//! There is no expiry: changing the embedding model is a maintenance
//! operation (drop the collection and rebuild), not a runtime concern.

pub mod error;
pub mod l1;
pub mod semantic;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{CacheError, CacheResult};
pub use l1::L1Cache;
pub use semantic::{CacheConfig, SemanticCache};
pub use types::{CacheLookup, CachedClaim};
