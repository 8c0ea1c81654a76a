//! Test fixtures for pipeline integration tests.
//!
//! [`MockedPipeline`] wires a [`ClaimPipeline`] entirely from in-memory
//! backends so scenarios run deterministic and offline. Verification order is
//! serialized (one concurrent claim) so scripted queues pop in sentence order.

use std::sync::Arc;

use serde_json::json;

use claimcheck::cache::{CacheConfig, SemanticCache};
use claimcheck::embedding::StubEmbedder;
use claimcheck::fetch::MockPageFetcher;
use claimcheck::llm::MockLlmService;
use claimcheck::pipeline::{ClaimPipeline, MockResultsLog, ResultsLog};
use claimcheck::search::mock::{MockClaimReviewApi, MockNewsSearch, MockWebSearch};
use claimcheck::search::ClaimReview;
use claimcheck::vectordb::MockVectorDbClient;

/// Stub vectors are low-dimensional; four axes are enough to pin distinct
/// sentences orthogonally.
pub const TEST_EMBEDDING_DIM: usize = 4;

pub struct MockedPipeline {
    pub llm: Arc<MockLlmService>,
    pub claim_api: Arc<MockClaimReviewApi>,
    pub web: Arc<MockWebSearch>,
    pub news: Arc<MockNewsSearch>,
    pub fetcher: Arc<MockPageFetcher>,
    pub log: Arc<MockResultsLog>,
    pub embedder: Arc<StubEmbedder>,
    pub pipeline: ClaimPipeline<MockVectorDbClient, StubEmbedder, Arc<MockPageFetcher>>,
}

impl MockedPipeline {
    pub async fn new() -> Self {
        Self::with_results_log(Arc::new(MockResultsLog::new())).await
    }

    pub async fn with_results_log(log: Arc<MockResultsLog>) -> Self {
        let llm = Arc::new(MockLlmService::new());
        let claim_api = Arc::new(MockClaimReviewApi::new());
        let web = Arc::new(MockWebSearch::new());
        let news = Arc::new(MockNewsSearch::new());
        let fetcher = Arc::new(MockPageFetcher::new());
        let embedder = Arc::new(StubEmbedder::with_dim(TEST_EMBEDDING_DIM));

        let pipeline = build_pipeline(
            Arc::clone(&embedder),
            Arc::clone(&claim_api),
            Arc::clone(&llm),
            Arc::clone(&web),
            Arc::clone(&news),
            Arc::clone(&fetcher),
            Arc::clone(&log) as Arc<dyn ResultsLog>,
        )
        .await;

        Self {
            llm,
            claim_api,
            web,
            news,
            fetcher,
            log,
            embedder,
            pipeline,
        }
    }
}

pub async fn build_pipeline(
    embedder: Arc<StubEmbedder>,
    claim_api: Arc<MockClaimReviewApi>,
    llm: Arc<MockLlmService>,
    web: Arc<MockWebSearch>,
    news: Arc<MockNewsSearch>,
    fetcher: Arc<MockPageFetcher>,
    log: Arc<dyn ResultsLog>,
) -> ClaimPipeline<MockVectorDbClient, StubEmbedder, Arc<MockPageFetcher>> {
    let cache = SemanticCache::new(
        MockVectorDbClient::new(),
        embedder,
        CacheConfig::default().with_collection_name("integration_tests"),
    );

    let pipeline = ClaimPipeline::new(cache, claim_api, llm, web, news, fetcher, log)
        .with_max_concurrent_claims(1);
    pipeline
        .prepare()
        .await
        .expect("mock collection creation cannot fail");
    pipeline
}

/// A published "False" review for `claim_text`.
pub fn false_review(claim_text: &str) -> ClaimReview {
    review(claim_text, "False")
}

/// A published review with an arbitrary rating.
pub fn review(claim_text: &str, rating_text: &str) -> ClaimReview {
    ClaimReview {
        claim_text: claim_text.to_string(),
        source: "Example Checks".to_string(),
        rating_text: rating_text.to_string(),
        review_url: "https://example.org/review/1".to_string(),
    }
}

/// A structured completion the synthesizer accepts.
pub fn synthesized_verdict(sentence: &str, rating: &str, severity: &str) -> serde_json::Value {
    json!({
        "sentence": sentence,
        "explanation": "Synthesized from gathered evidence.",
        "rating": rating,
        "severity": severity,
        "key_points": ["Point one.", "Point two.", "Point three."],
        "sources": ["https://web.example.com/evidence"]
    })
}

/// The structured judgement of the relevance filter.
pub fn relevance(relevant: bool) -> serde_json::Value {
    json!({ "relevant": relevant })
}
