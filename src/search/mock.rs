//! Scriptable search backends for tests.
//!
//! Each mock pops queued responses in FIFO order, records the queries it
//! received, and counts calls so tests can assert a channel was (or was not)
//! consulted. An exhausted queue yields an empty result set, matching a
//! backend that simply found nothing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::error::SearchResult;
use super::{ClaimReview, ClaimReviewApi, NewsHit, NewsQuery, NewsSearch, WebHit, WebSearch};

/// Scriptable [`ClaimReviewApi`].
#[derive(Default)]
pub struct MockClaimReviewApi {
    responses: Mutex<Vec<SearchResult<Vec<ClaimReview>>>>,
    queries: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockClaimReviewApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, reviews: Vec<ClaimReview>) {
        self.responses.lock().unwrap().push(Ok(reviews));
    }

    pub fn push_error(&self, error: super::SearchError) {
        self.responses.lock().unwrap().push(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClaimReviewApi for MockClaimReviewApi {
    async fn search(&self, query: &str) -> SearchResult<Vec<ClaimReview>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Vec::new())
        } else {
            responses.remove(0)
        }
    }
}

/// Scriptable [`WebSearch`].
#[derive(Default)]
pub struct MockWebSearch {
    responses: Mutex<Vec<SearchResult<Vec<WebHit>>>>,
    queries: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockWebSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, hits: Vec<WebHit>) {
        self.responses.lock().unwrap().push(Ok(hits));
    }

    pub fn push_error(&self, error: super::SearchError) {
        self.responses.lock().unwrap().push(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for MockWebSearch {
    async fn search(&self, query: &str, limit: usize) -> SearchResult<Vec<WebHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Vec::new())
        } else {
            responses.remove(0).map(|hits| {
                let mut hits = hits;
                hits.truncate(limit);
                hits
            })
        }
    }
}

/// Scriptable [`NewsSearch`].
#[derive(Default)]
pub struct MockNewsSearch {
    responses: Mutex<Vec<SearchResult<Vec<NewsHit>>>>,
    queries: Mutex<Vec<NewsQuery>>,
    calls: AtomicUsize,
}

impl MockNewsSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, hits: Vec<NewsHit>) {
        self.responses.lock().unwrap().push(Ok(hits));
    }

    pub fn push_error(&self, error: super::SearchError) {
        self.responses.lock().unwrap().push(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<NewsQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSearch for MockNewsSearch {
    async fn search(&self, query: &NewsQuery) -> SearchResult<Vec<NewsHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Vec::new())
        } else {
            responses.remove(0)
        }
    }
}
