use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use super::l1::L1Cache;
use super::semantic::{CacheConfig, SemanticCache};
use super::types::{CacheLookup, CachedClaim};
use crate::embedding::{Embedder, EmbeddingError, StubEmbedder};
use crate::verdict::{Rating, Severity, Verdict};
use crate::vectordb::{
    ClaimPoint, MockVectorDbClient, NearestNeighbor, VectorDbClient, VectorDbError,
};

fn sample_verdict(sentence: &str) -> Verdict {
    Verdict {
        sentence: sentence.to_string(),
        explanation: "Multiple fact checks contradict this claim.".to_string(),
        rating: Rating::False,
        rating_text: "False".to_string(),
        severity: Severity::High,
        key_points: vec![
            "Satellite imagery shows a spherical Earth.".to_string(),
            "Circumnavigation has been routine for centuries.".to_string(),
            "No credible measurements support a flat model.".to_string(),
        ],
        sources: vec!["https://example.org/flat-earth-check".to_string()],
        checked_at: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
    }
}

fn test_cache(threshold: f32) -> SemanticCache<MockVectorDbClient, StubEmbedder> {
    SemanticCache::new(
        MockVectorDbClient::new(),
        Arc::new(StubEmbedder::new()),
        CacheConfig::default()
            .with_collection_name("test_claims")
            .with_similarity_threshold(threshold),
    )
}

#[tokio::test]
async fn test_lookup_on_empty_index_is_miss() {
    let cache = test_cache(0.8);
    cache.ensure_collection().await.unwrap();

    let lookup = cache.lookup("The Earth is flat.").await.unwrap();
    assert!(matches!(lookup, CacheLookup::Miss));
}

#[tokio::test]
async fn test_insert_then_exact_lookup_hits() {
    let cache = test_cache(0.8);
    cache.ensure_collection().await.unwrap();

    let verdict = sample_verdict("The Earth is flat.");
    assert!(cache.insert_if_novel(&verdict).await.unwrap());

    let lookup = cache.lookup("The Earth is flat.").await.unwrap();
    let (claim, similarity) = lookup.hit(0.8).expect("exact repeat should hit");
    assert_eq!(claim.sentence, "The Earth is flat.");
    assert_eq!(claim.rating_text, "False");
    assert_eq!(similarity, 1.0);
}

#[tokio::test]
async fn test_exact_repeat_skips_the_embedder() {
    struct CountingEmbedder {
        inner: StubEmbedder,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.embed(text).await
        }

        fn dim(&self) -> usize {
            self.inner.dim()
        }
    }

    let embedder = Arc::new(CountingEmbedder {
        inner: StubEmbedder::new(),
        calls: AtomicUsize::new(0),
    });
    let cache = SemanticCache::new(
        MockVectorDbClient::new(),
        Arc::clone(&embedder),
        CacheConfig::default().with_collection_name("test_claims"),
    );
    cache.ensure_collection().await.unwrap();

    cache
        .insert_if_novel(&sample_verdict("Water boils at 100C at sea level."))
        .await
        .unwrap();
    let after_insert = embedder.calls.load(Ordering::SeqCst);

    // Insert populates L1, so the exact repeat never re-embeds.
    let lookup = cache
        .lookup("Water boils at 100C at sea level.")
        .await
        .unwrap();
    assert!(lookup.hit(0.8).is_some());
    assert_eq!(embedder.calls.load(Ordering::SeqCst), after_insert);
}

#[tokio::test]
async fn test_unrelated_sentence_falls_below_threshold() {
    let embedder = Arc::new(StubEmbedder::with_dim(2));
    embedder.pin("The Earth is flat.", vec![1.0, 0.0]);
    embedder.pin("Paris is the capital of France.", vec![0.0, 1.0]);

    let cache = SemanticCache::new(
        MockVectorDbClient::new(),
        Arc::clone(&embedder),
        CacheConfig::default().with_collection_name("test_claims"),
    );
    cache.ensure_collection().await.unwrap();
    cache
        .insert_if_novel(&sample_verdict("The Earth is flat."))
        .await
        .unwrap();

    // Orthogonal vectors: distance 1.0, similarity 0.5.
    let lookup = cache
        .lookup("Paris is the capital of France.")
        .await
        .unwrap();
    assert!(lookup.hit(0.8).is_none());
    let CacheLookup::Found { similarity, .. } = lookup else {
        panic!("nearest neighbor should still be reported");
    };
    assert!((similarity - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn test_near_duplicate_reuses_stored_verdict() {
    let embedder = Arc::new(StubEmbedder::with_dim(2));
    // cos(0.6) ~= 0.825, so distance ~= 0.175 and similarity ~= 0.85.
    let angle = 0.6_f32;
    embedder.pin("The Earth is flat.", vec![1.0, 0.0]);
    embedder.pin("Our planet is actually flat.", vec![angle.cos(), angle.sin()]);

    let cache = SemanticCache::new(
        MockVectorDbClient::new(),
        Arc::clone(&embedder),
        CacheConfig::default().with_collection_name("test_claims"),
    );
    cache.ensure_collection().await.unwrap();
    cache
        .insert_if_novel(&sample_verdict("The Earth is flat."))
        .await
        .unwrap();

    let lookup = cache.lookup("Our planet is actually flat.").await.unwrap();
    let (claim, similarity) = lookup.hit(0.8).expect("near duplicate should hit");
    assert_eq!(claim.sentence, "The Earth is flat.");
    assert!(similarity > 0.8 && similarity < 1.0);

    // And the rephrasing must not be stored as a new point.
    let stored = cache
        .insert_if_novel(&sample_verdict("Our planet is actually flat."))
        .await
        .unwrap();
    assert!(!stored);
}

#[tokio::test]
async fn test_duplicate_insert_is_skipped() {
    let cache = test_cache(0.8);
    cache.ensure_collection().await.unwrap();

    let verdict = sample_verdict("The moon landing was staged.");
    assert!(cache.insert_if_novel(&verdict).await.unwrap());
    assert!(!cache.insert_if_novel(&verdict).await.unwrap());
}

#[tokio::test]
async fn test_similarity_exactly_at_threshold_is_a_hit() {
    // Scripted index whose sole neighbor sits at cosine distance 0.25, so
    // similarity is exactly 1 / 1.25 = 0.8.
    struct FixedDistanceIndex {
        payload: serde_json::Value,
    }

    impl VectorDbClient for FixedDistanceIndex {
        async fn ensure_collection(&self, _: &str, _: u64) -> Result<(), VectorDbError> {
            Ok(())
        }

        async fn upsert_points(&self, _: &str, _: Vec<ClaimPoint>) -> Result<(), VectorDbError> {
            Ok(())
        }

        async fn nearest(
            &self,
            _: &str,
            _: Vec<f32>,
        ) -> Result<Option<NearestNeighbor>, VectorDbError> {
            Ok(Some(NearestNeighbor {
                id: 7,
                distance: 0.25,
                payload: self.payload.clone(),
            }))
        }
    }

    let stored = CachedClaim::from(&sample_verdict("The Earth is flat."));
    let cache = SemanticCache::new(
        FixedDistanceIndex {
            payload: stored.to_payload(),
        },
        Arc::new(StubEmbedder::new()),
        CacheConfig::default().with_collection_name("test_claims"),
    );

    let lookup = cache.lookup("The world is flat.").await.unwrap();
    let (claim, similarity) = lookup
        .hit(cache.threshold())
        .expect("equality with the threshold counts as a hit");
    assert_eq!(similarity, 0.8);
    assert_eq!(claim.sentence, "The Earth is flat.");

    // The same boundary suppresses the insert.
    let stored = cache
        .insert_if_novel(&sample_verdict("The world is flat."))
        .await
        .unwrap();
    assert!(!stored);
}

#[tokio::test]
async fn test_cached_claim_payload_round_trip() {
    let verdict = sample_verdict("The Earth is flat.");
    let claim = CachedClaim::from(&verdict);
    let decoded = CachedClaim::from_payload(claim.to_payload()).unwrap();
    assert_eq!(decoded.sentence, verdict.sentence);
    assert_eq!(decoded.rating_text, verdict.rating_text);
    assert_eq!(decoded.key_points, verdict.key_points);
    assert_eq!(decoded.checked_at, verdict.checked_at);
}

#[tokio::test]
async fn test_malformed_payload_is_an_error() {
    let err = CachedClaim::from_payload(serde_json::json!({"sentence": 42})).unwrap_err();
    assert!(err.to_string().contains("payload"));
}

#[test]
fn test_l1_capacity_and_overwrite() {
    let l1 = L1Cache::with_capacity(16);
    assert!(l1.is_empty());

    let claim = Arc::new(CachedClaim::from(&sample_verdict("A claim.")));
    l1.insert("A claim.", Arc::clone(&claim));
    l1.insert("A claim.", claim);
    assert_eq!(l1.len(), 1);
    assert!(l1.lookup("A claim.").is_some());
    assert!(l1.lookup("Another claim.").is_none());
}
