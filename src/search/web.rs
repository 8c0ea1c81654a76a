//! Google Custom Search backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::error::{SearchError, SearchResult};
use super::{WebHit, WebSearch};

/// Default Custom Search JSON API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// The API caps a single request at 10 results.
const MAX_RESULTS_PER_REQUEST: usize = 10;

/// Web search over the Google Custom Search JSON API.
pub struct GoogleCustomSearch {
    client: Client,
    base_url: String,
    api_key: String,
    engine_id: String,
}

impl GoogleCustomSearch {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Self {
        Self::with_base_url(client, api_key, engine_id, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        client: Client,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }
}

#[async_trait]
impl WebSearch for GoogleCustomSearch {
    #[instrument(skip(self, query))]
    async fn search(&self, query: &str, limit: usize) -> SearchResult<Vec<WebHit>> {
        let num = limit.min(MAX_RESULTS_PER_REQUEST).to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
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

        let body: CustomSearchResponse = response.json().await?;
        let hits: Vec<WebHit> = body
            .items
            .into_iter()
            .take(limit)
            .map(|item| WebHit {
                title: item.title,
                url: item.link,
                snippet: item.snippet,
            })
            .collect();
        debug!(count = hits.len(), "web hits received");

        Ok(hits)
    }
}

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_search_response_decoding() {
        let raw = r#"{"items": [
            {"title": "Fact brief", "link": "https://example.com/brief", "snippet": "Short answer."},
            {"title": "No snippet", "link": "https://example.com/other"}
        ]}"#;
        let decoded: CustomSearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.items.len(), 2);
        assert_eq!(decoded.items[0].snippet, "Short answer.");
        assert_eq!(decoded.items[1].snippet, "");
    }

    #[test]
    fn test_no_items_key_decodes_to_empty() {
        let decoded: CustomSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(decoded.items.is_empty());
    }
}
