//! Evidence search backends.
//!
//! Three channels feed verification: an authoritative claim-review API
//! (published fact checks), general web search, and recent news. Each is a
//! trait so the orchestrator and tests can swap implementations; the
//! production backends are Google Fact Check Tools, Google Custom Search,
//! and the DuckDuckGo news endpoint.

pub mod error;
pub mod factcheck;
pub mod news;
pub mod web;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::{SearchError, SearchResult};
pub use factcheck::FactCheckTools;
pub use news::DuckDuckGoNews;
pub use web::GoogleCustomSearch;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A published fact check returned by the claim-review API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimReview {
    /// The claim text as the reviewer recorded it.
    pub claim_text: String,
    /// Publisher of the review.
    pub source: String,
    /// The reviewer's verbatim rating (e.g. "False", "Pants on Fire!").
    pub rating_text: String,
    /// URL of the published review.
    pub review_url: String,
}

/// A general web search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// A news search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsHit {
    pub title: String,
    pub url: String,
    /// Article excerpt provided by the engine.
    pub body: String,
}

/// Parameters for a news search.
#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub keywords: String,
    /// Engine region code.
    pub region: String,
    /// Safe-search level: `on`, `moderate`, or `off`.
    pub safesearch: String,
    /// Recency window: `d`, `w`, or `m`; `None` for no limit.
    pub timelimit: Option<String>,
    pub max_results: usize,
}

impl NewsQuery {
    /// Builds a query with the defaults used for claim verification:
    /// worldwide region, moderate safe search, past week, 10 results.
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            region: "wt-wt".to_string(),
            safesearch: "moderate".to_string(),
            timelimit: Some("w".to_string()),
            max_results: 10,
        }
    }
}

/// Authoritative claim-review lookup.
#[async_trait]
pub trait ClaimReviewApi: Send + Sync {
    /// Returns published fact checks matching `query`, in API order.
    async fn search(&self, query: &str) -> SearchResult<Vec<ClaimReview>>;
}

/// General web search.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Returns up to `limit` web hits for `query`.
    async fn search(&self, query: &str, limit: usize) -> SearchResult<Vec<WebHit>>;
}

/// Recent news search.
#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Returns news hits for the query.
    async fn search(&self, query: &NewsQuery) -> SearchResult<Vec<NewsHit>>;
}
