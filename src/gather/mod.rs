//! Evidence gathering for unreviewed claims.
//!
//! When no published fact check covers a sentence, evidence is assembled
//! from web search and recent news. The top hits of each channel are fetched
//! for full article text; hits that will not load keep their engine snippet.
//! A channel that errors contributes nothing, and an entirely empty bundle
//! is still a valid output: the synthesizer falls back to model knowledge.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::fetch::PageFetcher;
use crate::search::{NewsQuery, NewsSearch, WebSearch};

/// Hits fetched for full text per channel.
const TOP_HITS_PER_CHANNEL: usize = 2;

/// Results requested from the web channel.
const WEB_RESULT_LIMIT: usize = 10;

/// One piece of evidence for a claim.
#[derive(Debug, Clone)]
pub struct EvidenceItem {
    pub title: String,
    pub url: String,
    /// Fetched article text, or the engine snippet when fetching failed.
    pub text: String,
    /// Whether `text` is fetched article content rather than a snippet.
    pub fetched: bool,
}

/// Evidence gathered for one sentence.
#[derive(Debug, Clone, Default)]
pub struct EvidenceBundle {
    /// Web search evidence.
    pub search: Vec<EvidenceItem>,
    /// News evidence.
    pub news: Vec<EvidenceItem>,
    /// URLs consulted, in channel order.
    pub source_urls: Vec<String>,
}

impl EvidenceBundle {
    /// True when no channel contributed anything.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.news.is_empty()
    }
}

/// Gathers evidence from search channels and the content fetcher.
pub struct EvidenceGatherer<W: ?Sized, N: ?Sized, F> {
    web: Arc<W>,
    news: Arc<N>,
    fetcher: F,
}

impl<W, N, F> EvidenceGatherer<W, N, F>
where
    W: WebSearch + ?Sized,
    N: NewsSearch + ?Sized,
    F: PageFetcher,
{
    pub fn new(web: Arc<W>, news: Arc<N>, fetcher: F) -> Self {
        Self { web, news, fetcher }
    }

    /// Gathers evidence for `sentence` from both channels.
    #[instrument(skip_all)]
    pub async fn gather(&self, sentence: &str) -> EvidenceBundle {
        let mut bundle = EvidenceBundle::default();

        let web_hits = match self.web.search(sentence, WEB_RESULT_LIMIT).await {
            Ok(hits) => hits,
            Err(error) => {
                warn!(%error, "web search failed, skipping channel");
                Vec::new()
            }
        };
        for hit in web_hits.into_iter().take(TOP_HITS_PER_CHANNEL) {
            let item = self.evidence_item(hit.title, hit.url, hit.snippet).await;
            bundle.source_urls.push(item.url.clone());
            bundle.search.push(item);
        }

        let news_hits = match self.news.search(&NewsQuery::new(sentence)).await {
            Ok(hits) => hits,
            Err(error) => {
                warn!(%error, "news search failed, skipping channel");
                Vec::new()
            }
        };
        for hit in news_hits.into_iter().take(TOP_HITS_PER_CHANNEL) {
            let item = self.evidence_item(hit.title, hit.url, hit.body).await;
            bundle.source_urls.push(item.url.clone());
            bundle.news.push(item);
        }

        debug!(
            search = bundle.search.len(),
            news = bundle.news.len(),
            "evidence gathered"
        );
        bundle
    }

    /// Fetches one hit, falling back to the engine's `snippet` when the page
    /// yields no text. The URL counts as consulted either way.
    async fn evidence_item(&self, title: String, url: String, snippet: String) -> EvidenceItem {
        match self.fetcher.fetch(&url).await {
            crate::fetch::FetchOutcome::Text(text) => EvidenceItem {
                title,
                url,
                text,
                fetched: true,
            },
            crate::fetch::FetchOutcome::Unavailable => EvidenceItem {
                title,
                url,
                text: snippet,
                fetched: false,
            },
        }
    }
}
