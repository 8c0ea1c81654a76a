//! DuckDuckGo news backend.
//!
//! DuckDuckGo has no official API; the news endpoint wants a `vqd` session
//! token scraped from a plain search page first, then answers JSON. The
//! token request and the news request share one client so the session
//! carries over.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::error::{SearchError, SearchResult};
use super::{NewsHit, NewsQuery, NewsSearch};

/// Default search page used to obtain the `vqd` token.
pub const DEFAULT_HTML_URL: &str = "https://duckduckgo.com/";

/// Default news JSON endpoint.
pub const DEFAULT_NEWS_URL: &str = "https://duckduckgo.com/news.js";

/// News search over the DuckDuckGo news endpoint.
pub struct DuckDuckGoNews {
    client: Client,
    html_url: String,
    news_url: String,
}

impl DuckDuckGoNews {
    pub fn new(client: Client) -> Self {
        Self::with_base_urls(client, DEFAULT_HTML_URL, DEFAULT_NEWS_URL)
    }

    pub fn with_base_urls(
        client: Client,
        html_url: impl Into<String>,
        news_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            html_url: html_url.into(),
            news_url: news_url.into(),
        }
    }

    /// Fetches the search page and scrapes the `vqd` token out of it.
    async fn vqd_token(&self, keywords: &str) -> SearchResult<String> {
        let response = self
            .client
            .get(&self.html_url)
            .query(&[("q", keywords)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: "token request rejected".to_string(),
            });
        }

        let body = response.text().await?;
        extract_vqd(&body).ok_or_else(|| SearchError::MalformedResponse {
            reason: "vqd token not found in search page".to_string(),
        })
    }
}

/// Scrapes a `vqd=...` token from search page markup. The token appears
/// quoted in inline script, e.g. `vqd="4-128..."` or `vqd='4-128...'`.
fn extract_vqd(html: &str) -> Option<String> {
    let start = html.find("vqd=")? + "vqd=".len();
    let rest = &html[start..];

    let (rest, terminator) = match rest.chars().next()? {
        quote @ ('"' | '\'') => (&rest[1..], Some(quote)),
        _ => (rest, None),
    };

    let end = rest
        .char_indices()
        .find(|&(_, c)| match terminator {
            Some(quote) => c == quote,
            None => !c.is_ascii_alphanumeric() && c != '-' && c != '_',
        })
        .map_or(rest.len(), |(idx, _)| idx);

    let token = &rest[..end];
    (!token.is_empty()).then(|| token.to_string())
}

/// Maps a safe-search level to the engine's `p` parameter.
fn safesearch_param(level: &str) -> &'static str {
    match level {
        "on" => "1",
        "off" => "-2",
        _ => "-1",
    }
}

#[async_trait]
impl NewsSearch for DuckDuckGoNews {
    #[instrument(skip(self, query), fields(region = %query.region))]
    async fn search(&self, query: &NewsQuery) -> SearchResult<Vec<NewsHit>> {
        let vqd = self.vqd_token(&query.keywords).await?;

        let mut params = vec![
            ("l", query.region.clone()),
            ("o", "json".to_string()),
            ("noamp", "1".to_string()),
            ("q", query.keywords.clone()),
            ("vqd", vqd),
            ("p", safesearch_param(&query.safesearch).to_string()),
        ];
        if let Some(timelimit) = &query.timelimit {
            params.push(("df", timelimit.clone()));
        }

        let response = self
            .client
            .get(&self.news_url)
            .query(&params)
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

        let body: NewsResponse = response.json().await?;
        let hits: Vec<NewsHit> = body
            .results
            .into_iter()
            .take(query.max_results)
            .map(|item| NewsHit {
                title: item.title,
                url: item.url,
                body: item.excerpt,
            })
            .collect();
        debug!(count = hits.len(), "news hits received");

        Ok(hits)
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    results: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    excerpt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_vqd_variants() {
        assert_eq!(
            extract_vqd(r#"<script>vqd="4-128837594";load();</script>"#).as_deref(),
            Some("4-128837594")
        );
        assert_eq!(
            extract_vqd("<script>vqd='4-99_a';</script>").as_deref(),
            Some("4-99_a")
        );
        assert_eq!(extract_vqd("vqd=4-12345&o=json").as_deref(), Some("4-12345"));
        assert_eq!(extract_vqd("no token here"), None);
        assert_eq!(extract_vqd(r#"vqd="""#), None);
    }

    #[test]
    fn test_safesearch_param_mapping() {
        assert_eq!(safesearch_param("on"), "1");
        assert_eq!(safesearch_param("moderate"), "-1");
        assert_eq!(safesearch_param("off"), "-2");
        assert_eq!(safesearch_param("anything else"), "-1");
    }

    #[test]
    fn test_news_response_decoding() {
        let raw = r#"{"results": [
            {"title": "Claim resurfaces", "url": "https://news.example.com/a", "excerpt": "It spread again."},
            {"title": "No excerpt", "url": "https://news.example.com/b"}
        ]}"#;
        let decoded: NewsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.results.len(), 2);
        assert_eq!(decoded.results[0].excerpt, "It spread again.");
        assert_eq!(decoded.results[1].excerpt, "");
    }
}
