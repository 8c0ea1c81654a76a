//! Claimcheck library crate (used by the CLI binary and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//! - [`Claim`], [`Verdict`], [`Rating`], [`Severity`] - Verdict domain types
//! - [`ClaimPipeline`] - End-to-end claim verification
//!
//! ## Caching
//! - [`SemanticCache`], [`CacheConfig`], [`CacheLookup`], [`CachedClaim`] -
//!   Two-tier semantic cache of checked claims
//! - [`QdrantClient`], [`VectorDbClient`] - Vector index access
//! - Hashing functions for cache keys and point ids
//!
//! ## Services
//! - [`LlmService`], [`OpenAiLlm`] - Schema-constrained completions
//! - [`Embedder`], [`OpenAiEmbedder`] - Sentence embeddings
//! - [`ClaimReviewApi`], [`WebSearch`], [`NewsSearch`] - Evidence search
//! - [`ContentFetcher`] - Evidence page fetching and extraction
//! - [`EvidenceGatherer`], [`RelevanceFilter`], [`VerdictSynthesizer`]
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod embedding;
pub mod fetch;
pub mod gather;
pub mod hashing;
pub mod llm;
pub mod pipeline;
pub mod relevance;
pub mod search;
pub mod segment;
pub mod synthesis;
pub mod vectordb;
pub mod verdict;

pub use cache::{CacheConfig, CacheError, CacheLookup, CacheResult, CachedClaim, SemanticCache};
pub use config::{Config, ConfigError};
#[cfg(any(test, feature = "mock"))]
pub use embedding::StubEmbedder;
pub use embedding::{DEFAULT_EMBEDDING_DIM, Embedder, EmbeddingError, OpenAiEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use fetch::MockPageFetcher;
pub use fetch::{ContentFetcher, FetchError, FetchOutcome, PageFetcher, Sleeper, TokioSleeper};
pub use gather::{EvidenceBundle, EvidenceGatherer, EvidenceItem};
pub use hashing::{claim_point_id, hash_sentence};
#[cfg(any(test, feature = "mock"))]
pub use llm::MockLlmService;
pub use llm::{LlmError, LlmService, OpenAiLlm, ResponseSchema};
#[cfg(any(test, feature = "mock"))]
pub use pipeline::MockResultsLog;
pub use pipeline::{
    ClaimPipeline, DEFAULT_MAX_CONCURRENT_CLAIMS, JsonlResultsLog, PipelineError, ResultsLog,
};
pub use relevance::RelevanceFilter;
pub use search::{
    ClaimReview, ClaimReviewApi, DuckDuckGoNews, FactCheckTools, GoogleCustomSearch, NewsHit,
    NewsQuery, NewsSearch, SearchError, WebHit, WebSearch,
};
pub use segment::split_sentences;
pub use synthesis::{SynthesisError, VerdictSynthesizer};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockVectorDbClient;
pub use vectordb::{
    ClaimPoint, DEFAULT_COLLECTION_NAME, NearestNeighbor, QdrantClient, VectorDbClient,
    VectorDbError,
};
pub use verdict::{Claim, Rating, Severity, Verdict};
