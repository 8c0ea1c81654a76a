//! Google Fact Check Tools backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::error::{SearchError, SearchResult};
use super::{ClaimReview, ClaimReviewApi};

/// Default claims:search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://factchecktools.googleapis.com/v1alpha1/claims:search";

/// Claim-review lookup over the Google Fact Check Tools API.
pub struct FactCheckTools {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FactCheckTools {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ClaimReviewApi for FactCheckTools {
    #[instrument(skip(self, query))]
    async fn search(&self, query: &str) -> SearchResult<Vec<ClaimReview>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ClaimsSearchResponse = response.json().await?;
        let reviews: Vec<ClaimReview> = body.claims.into_iter().map(ClaimReview::from).collect();
        debug!(count = reviews.len(), "claim reviews received");

        Ok(reviews)
    }
}

#[derive(Debug, Deserialize)]
struct ClaimsSearchResponse {
    #[serde(default)]
    claims: Vec<ApiClaim>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiClaim {
    #[serde(default)]
    text: String,
    #[serde(default)]
    claim_review: Vec<ApiClaimReview>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiClaimReview {
    publisher: Option<ApiPublisher>,
    url: Option<String>,
    textual_rating: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPublisher {
    name: Option<String>,
    site: Option<String>,
}

impl From<ApiClaim> for ClaimReview {
    fn from(claim: ApiClaim) -> Self {
        // The API nests an array of reviews per claim; the first carries the
        // rating the publisher leads with.
        let review = claim.claim_review.into_iter().next();
        let (source, review_url, rating_text) = match review {
            Some(review) => {
                let source = review
                    .publisher
                    .and_then(|p| p.name.or(p.site))
                    .unwrap_or_default();
                (
                    source,
                    review.url.unwrap_or_default(),
                    review
                        .textual_rating
                        .unwrap_or_else(|| "Unknown".to_string()),
                )
            }
            None => (String::new(), String::new(), "Unknown".to_string()),
        };

        Self {
            claim_text: claim.text,
            source,
            rating_text,
            review_url,
        }
    }
}
