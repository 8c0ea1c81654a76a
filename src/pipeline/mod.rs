//! Claim verification orchestrator.
//!
//! [`ClaimPipeline`] wires the whole chain together: segmentation, the
//! semantic cache, the authoritative claim-review tier, evidence gathering,
//! and verdict synthesis. Sentences are verified concurrently under a
//! semaphore and results are returned in document order. Every sentence
//! yields exactly one [`Claim`]; failures degrade instead of aborting.

pub mod error;
pub mod results_log;


pub use error::{PipelineError, PipelineResult};
#[cfg(any(test, feature = "mock"))]
pub use results_log::MockResultsLog;
pub use results_log::{JsonlResultsLog, ResultsLog};

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::cache::SemanticCache;
use crate::embedding::Embedder;
use crate::fetch::PageFetcher;
use crate::gather::EvidenceGatherer;
use crate::llm::LlmService;
use crate::relevance::RelevanceFilter;
use crate::search::{ClaimReview, ClaimReviewApi, NewsSearch, WebSearch};
use crate::segment::split_sentences;
use crate::synthesis::{SynthesisResult, VerdictSynthesizer};
use crate::vectordb::VectorDbClient;
use crate::verdict::{Claim, Rating, Severity, Verdict};

/// Default bound on concurrently verified claims.
pub const DEFAULT_MAX_CONCURRENT_CLAIMS: usize = 4;

/// Orchestrates verification of a text's claims.
pub struct ClaimPipeline<V, E: ?Sized, F> {
    cache: SemanticCache<V, E>,
    claim_api: Arc<dyn ClaimReviewApi>,
    relevance: RelevanceFilter<dyn LlmService>,
    gatherer: EvidenceGatherer<dyn WebSearch, dyn NewsSearch, F>,
    synthesizer: VerdictSynthesizer<dyn LlmService>,
    results_log: Arc<dyn ResultsLog>,
    max_concurrent_claims: usize,
}

impl<V, E, F> ClaimPipeline<V, E, F>
where
    V: VectorDbClient,
    E: Embedder + ?Sized,
    F: PageFetcher,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cache: SemanticCache<V, E>,
        claim_api: Arc<dyn ClaimReviewApi>,
        llm: Arc<dyn LlmService>,
        web: Arc<dyn WebSearch>,
        news: Arc<dyn NewsSearch>,
        fetcher: F,
        results_log: Arc<dyn ResultsLog>,
    ) -> Self {
        Self {
            cache,
            claim_api,
            relevance: RelevanceFilter::new(Arc::clone(&llm)),
            gatherer: EvidenceGatherer::new(web, news, fetcher),
            synthesizer: VerdictSynthesizer::new(llm),
            results_log,
            max_concurrent_claims: DEFAULT_MAX_CONCURRENT_CLAIMS,
        }
    }

    /// Overrides the concurrency bound.
    pub fn with_max_concurrent_claims(mut self, max: usize) -> Self {
        self.max_concurrent_claims = max.max(1);
        self
    }

    /// Creates the cache's backing collection if it does not exist.
    pub async fn prepare(&self) -> crate::cache::CacheResult<()> {
        self.cache.ensure_collection().await
    }

    /// Segments `text` and verifies every sentence.
    ///
    /// Claims come back in document order, one per sentence, regardless of
    /// completion order.
    #[instrument(skip_all)]
    pub async fn analyze(&self, text: &str) -> Vec<Claim> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Vec::new();
        }
        info!(sentences = sentences.len(), "analyzing text");

        let semaphore = Semaphore::new(self.max_concurrent_claims);
        let tasks = sentences.iter().enumerate().map(|(idx, sentence)| {
            let semaphore = &semaphore;
            async move {
                // The semaphore is never closed, so acquisition only fails
                // if the runtime is tearing down; verify unthrottled then.
                let _permit = semaphore.acquire().await.ok();
                self.verify_claim(idx + 1, sentence).await
            }
        });

        join_all(tasks).await
    }

    /// Suggests a more accurate rewrite of a rated sentence.
    pub async fn suggest_rewrite(
        &self,
        sentence: &str,
        rating_text: &str,
    ) -> SynthesisResult<String> {
        self.synthesizer.suggest_rewrite(sentence, rating_text).await
    }

    /// Verifies one sentence: cache first, then the fresh chain.
    #[instrument(skip_all, fields(position))]
    async fn verify_claim(&self, position: usize, sentence: &str) -> Claim {
        match self.cache.lookup(sentence).await {
            Ok(lookup) => {
                if let Some((cached, similarity)) = lookup.hit(self.cache.threshold()) {
                    debug!(similarity, "serving cached verdict");
                    return Claim {
                        position,
                        sentence: sentence.to_string(),
                        verdict: cached.to_verdict(),
                        cache_hit: true,
                    };
                }
            }
            Err(error) => {
                warn!(%error, "cache lookup failed, verifying fresh");
            }
        }

        let verdict = match self.fresh_verdict(sentence).await {
            Ok(verdict) => {
                self.persist(&verdict).await;
                verdict
            }
            Err(error) => {
                warn!(%error, "claim verification failed");
                Verdict::degraded(sentence, &error.to_string())
            }
        };

        Claim {
            position,
            sentence: sentence.to_string(),
            verdict,
            cache_hit: false,
        }
    }

    /// The fresh verification chain: authoritative reviews first, evidence
    /// synthesis when none applies.
    async fn fresh_verdict(&self, sentence: &str) -> PipelineResult<Verdict> {
        let reviews = self.claim_api.search(sentence).await?;

        if !reviews.is_empty() {
            if let Some(review) = self.relevance.first_relevant(sentence, &reviews).await? {
                debug!(source = %review.source, "authoritative review applies");
                return Ok(authoritative_verdict(sentence, review));
            }
        }

        let bundle = self.gatherer.gather(sentence).await;
        let verdict = self.synthesizer.synthesize(sentence, &bundle).await?;
        Ok(verdict)
    }

    /// Stores a fresh verdict in the cache and the results log. Neither
    /// failure blocks returning the verdict.
    async fn persist(&self, verdict: &Verdict) {
        match self.cache.insert_if_novel(verdict).await {
            Ok(true) => debug!("verdict cached"),
            Ok(false) => debug!("near-duplicate verdict already cached"),
            Err(error) => warn!(%error, "failed to cache verdict"),
        }

        if let Err(error) = self.results_log.append(verdict) {
            warn!(%error, "failed to append to results log");
        }
    }
}

/// Builds a verdict from a published claim review. Severity comes from the
/// fixed rating table, not the LLM.
fn authoritative_verdict(sentence: &str, review: ClaimReview) -> Verdict {
    let severity = Severity::from_rating_text(&review.rating_text);
    let rating = Rating::from_text(&review.rating_text);
    let source = if review.review_url.is_empty() {
        review.source
    } else {
        review.review_url
    };

    Verdict {
        sentence: sentence.to_string(),
        explanation: review.claim_text,
        rating,
        rating_text: review.rating_text,
        severity,
        key_points: Vec::new(),
        sources: vec![source],
        checked_at: chrono::Utc::now().date_naive(),
    }
}
