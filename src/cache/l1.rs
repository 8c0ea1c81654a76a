//! L1 exact-match cache (in-memory).
//!
//! Keyed by the BLAKE3 hash of the verbatim sentence. Serves repeats of the
//! exact same sentence without an embedding call; semantic near-duplicates
//! fall through to the vector index.

use std::sync::Arc;

use moka::sync::Cache;

use super::types::CachedClaim;
use crate::hashing::hash_sentence;

/// In-memory exact-match cache keyed by sentence hash.
pub struct L1Cache {
    entries: Cache<[u8; 32], Arc<CachedClaim>>,
}

impl L1Cache {
    const DEFAULT_CAPACITY: u64 = 10_000;

    /// Creates a cache with the default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a cache with a max entry capacity (LRU eviction).
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Looks up a sentence by hashing it with [`hash_sentence`].
    #[inline]
    pub fn lookup(&self, sentence: &str) -> Option<Arc<CachedClaim>> {
        self.entries.get(&hash_sentence(sentence))
    }

    /// Inserts a sentence → claim mapping.
    ///
    /// The key is the lookup sentence, which for a semantic hit may differ
    /// from `claim.sentence`.
    #[inline]
    pub fn insert(&self, sentence: &str, claim: Arc<CachedClaim>) {
        self.entries.insert(hash_sentence(sentence), claim);
    }

    /// Returns the number of cached entries.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    /// Returns `true` when the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for L1Cache {
    fn default() -> Self {
        Self::new()
    }
}
