//! Scriptable page fetcher for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{FetchOutcome, PageFetcher};

/// [`PageFetcher`] returning canned outcomes per URL.
///
/// Unscripted URLs resolve to [`FetchOutcome::Unavailable`], matching a page
/// that could not be fetched. Requested URLs and a call counter are recorded
/// for assertions.
#[derive(Default)]
pub struct MockPageFetcher {
    outcomes: Mutex<HashMap<String, FetchOutcome>>,
    requested: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `url` to yield extracted `text`.
    pub fn script_text(&self, url: &str, text: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(url.to_string(), FetchOutcome::Text(text.to_string()));
    }

    /// Scripts `url` to be unavailable (the default for unscripted URLs).
    pub fn script_unavailable(&self, url: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(url.to_string(), FetchOutcome::Unavailable);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());

        self.outcomes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or(FetchOutcome::Unavailable)
    }
}
