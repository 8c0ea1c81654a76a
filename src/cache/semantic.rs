use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::error::CacheResult;
use super::l1::L1Cache;
use super::types::{CacheLookup, CachedClaim};
use crate::embedding::Embedder;
use crate::hashing::claim_point_id;
use crate::vectordb::{ClaimPoint, DEFAULT_COLLECTION_NAME, VectorDbClient};
use crate::verdict::Verdict;

/// Semantic cache settings.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Vector collection holding previously checked claims.
    pub collection_name: String,
    /// Similarity at or above which two sentences are the same claim.
    pub similarity_threshold: f32,
    /// Max entries in the L1 exact-match cache.
    pub l1_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            similarity_threshold: 0.8,
            l1_capacity: 10_000,
        }
    }
}

impl CacheConfig {
    pub fn with_collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_l1_capacity(mut self, capacity: u64) -> Self {
        self.l1_capacity = capacity;
        self
    }
}

/// Two-tier cache of checked claims: an L1 exact-match layer in front of a
/// vector index of sentence embeddings.
///
/// Similarity is `1 / (1 + distance)` over cosine distance, so an exact
/// vector match scores `1.0` and scores decay toward zero as claims diverge.
pub struct SemanticCache<V, E: ?Sized> {
    index: V,
    embedder: Arc<E>,
    l1: L1Cache,
    config: CacheConfig,
}

impl<V, E> SemanticCache<V, E>
where
    V: VectorDbClient,
    E: Embedder + ?Sized,
{
    pub fn new(index: V, embedder: Arc<E>, config: CacheConfig) -> Self {
        let l1 = L1Cache::with_capacity(config.l1_capacity);
        Self {
            index,
            embedder,
            l1,
            config,
        }
    }

    /// The configured similarity threshold.
    pub fn threshold(&self) -> f32 {
        self.config.similarity_threshold
    }

    /// Creates the backing collection if it does not exist.
    pub async fn ensure_collection(&self) -> CacheResult<()> {
        self.index
            .ensure_collection(&self.config.collection_name, self.embedder.dim() as u64)
            .await?;
        Ok(())
    }

    /// Looks up the nearest previously checked claim for `sentence`.
    ///
    /// Returns the neighbor regardless of threshold; callers apply
    /// [`CacheLookup::hit`] to decide whether it counts. An L1 exact match
    /// short-circuits the embedding call and reports similarity `1.0`.
    #[instrument(skip(self, sentence), fields(collection = %self.config.collection_name))]
    pub async fn lookup(&self, sentence: &str) -> CacheResult<CacheLookup> {
        if let Some(claim) = self.l1.lookup(sentence) {
            debug!("l1 exact hit");
            return Ok(CacheLookup::Found {
                claim: (*claim).clone(),
                similarity: 1.0,
            });
        }

        let vector = self.embedder.embed(sentence).await?;
        let Some(neighbor) = self
            .index
            .nearest(&self.config.collection_name, vector)
            .await?
        else {
            debug!("index empty");
            return Ok(CacheLookup::Miss);
        };

        let similarity = 1.0 / (1.0 + neighbor.distance);
        let claim = CachedClaim::from_payload(neighbor.payload)?;
        debug!(similarity, distance = neighbor.distance, "nearest neighbor");

        // Promote threshold-passing neighbors so repeats of this exact
        // sentence skip the embedding call next time.
        if similarity >= self.config.similarity_threshold {
            self.l1.insert(sentence, Arc::new(claim.clone()));
        }

        Ok(CacheLookup::Found { claim, similarity })
    }

    /// Stores a verdict unless a stored claim already covers it.
    ///
    /// Re-embeds the verdict sentence and skips the write when the nearest
    /// neighbor meets the similarity threshold, so retries and concurrent
    /// checks of near-identical sentences do not pile up duplicate points.
    /// Returns `true` when a point was written.
    #[instrument(skip(self, verdict), fields(collection = %self.config.collection_name))]
    pub async fn insert_if_novel(&self, verdict: &Verdict) -> CacheResult<bool> {
        let vector = self.embedder.embed(&verdict.sentence).await?;

        if let Some(neighbor) = self
            .index
            .nearest(&self.config.collection_name, vector.clone())
            .await?
        {
            let similarity = 1.0 / (1.0 + neighbor.distance);
            if similarity >= self.config.similarity_threshold {
                debug!(similarity, "duplicate claim, skipping insert");
                return Ok(false);
            }
        }

        let claim = CachedClaim::from(verdict);
        let point = ClaimPoint {
            id: claim_point_id(&verdict.sentence),
            vector,
            payload: claim.to_payload(),
        };
        self.index
            .upsert_points(&self.config.collection_name, vec![point])
            .await?;
        self.l1.insert(&verdict.sentence, Arc::new(claim));
        info!("stored new claim verdict");

        Ok(true)
    }
}
