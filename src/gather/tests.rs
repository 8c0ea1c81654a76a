use std::sync::Arc;

use super::EvidenceGatherer;
use crate::fetch::MockPageFetcher;
use crate::search::mock::{MockNewsSearch, MockWebSearch};
use crate::search::{NewsHit, SearchError, WebHit};

fn web_hit(n: usize) -> WebHit {
    WebHit {
        title: format!("Web result {n}"),
        url: format!("https://web.example.com/{n}"),
        snippet: format!("Web snippet {n}"),
    }
}

fn news_hit(n: usize) -> NewsHit {
    NewsHit {
        title: format!("News story {n}"),
        url: format!("https://news.example.com/{n}"),
        body: format!("News excerpt {n}"),
    }
}

#[tokio::test]
async fn test_gathers_top_two_hits_per_channel() {
    let web = Arc::new(MockWebSearch::new());
    web.push_response((0..5).map(web_hit).collect());
    let news = Arc::new(MockNewsSearch::new());
    news.push_response((0..5).map(news_hit).collect());

    let fetcher = MockPageFetcher::new();
    fetcher.script_text("https://web.example.com/0", "Full article zero.");
    fetcher.script_text("https://web.example.com/1", "Full article one.");
    fetcher.script_text("https://news.example.com/0", "Full story zero.");
    fetcher.script_text("https://news.example.com/1", "Full story one.");

    let gatherer = EvidenceGatherer::new(web, news, fetcher);
    let bundle = gatherer.gather("The Earth is flat.").await;

    assert_eq!(bundle.search.len(), 2);
    assert_eq!(bundle.news.len(), 2);
    assert!(bundle.search.iter().all(|item| item.fetched));
    assert_eq!(bundle.search[0].text, "Full article zero.");
    assert_eq!(
        bundle.source_urls,
        vec![
            "https://web.example.com/0",
            "https://web.example.com/1",
            "https://news.example.com/0",
            "https://news.example.com/1",
        ]
    );
}

#[tokio::test]
async fn test_failed_fetch_falls_back_to_snippet() {
    let web = Arc::new(MockWebSearch::new());
    web.push_response(vec![web_hit(0)]);
    let news = Arc::new(MockNewsSearch::new());
    news.push_response(vec![news_hit(0)]);

    // Nothing scripted: every fetch is unavailable.
    let gatherer = EvidenceGatherer::new(web, news, MockPageFetcher::new());
    let bundle = gatherer.gather("A claim.").await;

    assert_eq!(bundle.search.len(), 1);
    assert!(!bundle.search[0].fetched);
    assert_eq!(bundle.search[0].text, "Web snippet 0");
    assert_eq!(bundle.news[0].text, "News excerpt 0");

    // Unfetchable hits still count as consulted sources.
    assert_eq!(
        bundle.source_urls,
        vec!["https://web.example.com/0", "https://news.example.com/0"]
    );
}

#[tokio::test]
async fn test_channel_error_contributes_nothing() {
    let web = Arc::new(MockWebSearch::new());
    web.push_error(SearchError::Api {
        status: 429,
        message: "quota exhausted".to_string(),
    });
    let news = Arc::new(MockNewsSearch::new());
    news.push_response(vec![news_hit(0)]);

    let fetcher = MockPageFetcher::new();
    fetcher.script_text("https://news.example.com/0", "Full story zero.");

    let gatherer = EvidenceGatherer::new(web, news, fetcher);
    let bundle = gatherer.gather("A claim.").await;

    assert!(bundle.search.is_empty());
    assert_eq!(bundle.news.len(), 1);
    assert!(!bundle.is_empty());
}

#[tokio::test]
async fn test_all_channels_empty_is_a_valid_bundle() {
    let gatherer = EvidenceGatherer::new(
        Arc::new(MockWebSearch::new()),
        Arc::new(MockNewsSearch::new()),
        MockPageFetcher::new(),
    );
    let bundle = gatherer.gather("A claim nobody wrote about.").await;

    assert!(bundle.is_empty());
    assert!(bundle.source_urls.is_empty());
}

#[tokio::test]
async fn test_news_query_uses_recency_defaults() {
    let news = Arc::new(MockNewsSearch::new());
    let gatherer = EvidenceGatherer::new(
        Arc::new(MockWebSearch::new()),
        Arc::clone(&news),
        MockPageFetcher::new(),
    );
    gatherer.gather("A claim.").await;

    let queries = news.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].timelimit.as_deref(), Some("w"));
    assert_eq!(queries[0].max_results, 10);
}
