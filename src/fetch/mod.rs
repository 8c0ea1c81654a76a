//! Evidence page fetching.
//!
//! Downloads source pages named by search results and reduces them to plain
//! article text. Sources disappear, block bots, and rot constantly, so every
//! failure here degrades to [`FetchOutcome::Unavailable`] instead of
//! propagating; the caller falls back to the search snippet.

pub mod error;
pub mod extract;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::{FetchError, FetchResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockPageFetcher;

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use reqwest::header;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

/// Default cap on fetch attempts per URL.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Browser user agents rotated randomly per attempt.
const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
];

/// Result of fetching one evidence URL.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Extracted article text.
    Text(String),
    /// The page could not be fetched or yielded no usable text.
    Unavailable,
}

impl FetchOutcome {
    /// Returns the extracted text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            FetchOutcome::Text(text) => Some(text),
            FetchOutcome::Unavailable => None,
        }
    }
}

/// Async sleep hook so tests can observe backoff without waiting for it.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Fetch interface consumed by the evidence gatherer.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

impl<S> PageFetcher for ContentFetcher<S>
where
    S: Sleeper,
{
    async fn fetch(&self, url: &str) -> FetchOutcome {
        ContentFetcher::fetch(self, url).await
    }
}

impl<F> PageFetcher for std::sync::Arc<F>
where
    F: PageFetcher,
{
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send {
        (**self).fetch(url)
    }
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// What to do after an attempt ends with a given HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    /// Use the response body.
    Proceed,
    /// Retry with a cookie-consent hint (403).
    RetryWithCookie,
    /// Give up on this URL (404, 5xx, other non-success).
    Abort,
}

fn disposition_for(status: StatusCode) -> Disposition {
    if status.is_success() {
        Disposition::Proceed
    } else if status == StatusCode::FORBIDDEN {
        Disposition::RetryWithCookie
    } else {
        Disposition::Abort
    }
}

/// Backoff before retry number `attempt` (0-based): `2^attempt` seconds plus
/// up to one second of jitter.
fn backoff(attempt: u32) -> Duration {
    let jitter: f64 = rand::thread_rng().gen_range(0.0..1.0);
    Duration::from_secs_f64((1u64 << attempt) as f64 + jitter)
}

fn random_user_agent() -> &'static str {
    USER_AGENTS[rand::thread_rng().gen_range(0..USER_AGENTS.len())]
}

/// True when a redirect landed on the site root though a deeper path was
/// requested. Dead articles often redirect to the front page instead of
/// returning 404.
fn is_soft_404(requested: &Url, final_url: &Url) -> bool {
    final_url.path() == "/" && requested.path() != "/"
}

/// Fetches evidence pages and extracts their article text.
pub struct ContentFetcher<S = TokioSleeper> {
    client: Client,
    max_attempts: u32,
    sleeper: S,
}

impl ContentFetcher<TokioSleeper> {
    /// Creates a fetcher with the production sleeper.
    pub fn new(max_attempts: u32) -> FetchResult<Self> {
        Self::with_sleeper(max_attempts, TokioSleeper)
    }
}

impl<S> ContentFetcher<S>
where
    S: Sleeper,
{
    /// Creates a fetcher with a custom sleeper.
    pub fn with_sleeper(max_attempts: u32, sleeper: S) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            max_attempts,
            sleeper,
        })
    }

    /// Fetches `url` and extracts its article text.
    ///
    /// Retries transport errors and 403s (with a cookie-consent hint) up to
    /// the attempt cap; 404 and server errors abort immediately.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let Ok(requested) = Url::parse(url) else {
            warn!("invalid url, skipping");
            return FetchOutcome::Unavailable;
        };

        let mut cookie_hint = false;
        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                self.sleeper.sleep(backoff(attempt - 1)).await;
            }

            let mut request = self
                .client
                .get(url)
                .header(header::USER_AGENT, random_user_agent())
                .header(
                    header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
                )
                .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
                .header(header::REFERER, "https://www.google.com/")
                .header(header::DNT, "1")
                .header(header::CONNECTION, "keep-alive")
                .header(header::UPGRADE_INSECURE_REQUESTS, "1");
            if cookie_hint {
                request = request.header(header::COOKIE, "accept_cookies=1");
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(error) => {
                    warn!(attempt, %error, "transport error, retrying");
                    continue;
                }
            };

            let status = response.status();
            match disposition_for(status) {
                Disposition::Proceed => {}
                Disposition::RetryWithCookie => {
                    warn!(attempt, %status, "access forbidden, retrying with cookie hint");
                    cookie_hint = true;
                    continue;
                }
                Disposition::Abort => {
                    warn!(%status, "unrecoverable status, skipping url");
                    return FetchOutcome::Unavailable;
                }
            }

            if is_soft_404(&requested, response.url()) {
                // Extract from whatever the front page holds rather than
                // chasing the moved article.
                debug!("redirected to site root, extracting landing page");
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(error) => {
                    warn!(attempt, %error, "failed to read body, retrying");
                    continue;
                }
            };

            if let Some(text) = extract::article_text(&body) {
                return FetchOutcome::Text(text);
            }
            return self.fallback(&requested, &body).await;
        }

        warn!(attempts = self.max_attempts, "exhausted fetch attempts");
        FetchOutcome::Unavailable
    }

    /// Site-specific extraction for pages the generic heuristic cannot read.
    async fn fallback(&self, url: &Url, body: &str) -> FetchOutcome {
        let host = url.host_str().unwrap_or("");
        if !host.ends_with("msn.com") {
            debug!("no usable text extracted");
            return FetchOutcome::Unavailable;
        }

        if url.path().contains("/video/") {
            return self.msn_video_detail(url).await;
        }

        match extract::ld_json_summary(body) {
            Some(summary) => FetchOutcome::Text(summary),
            None => FetchOutcome::Unavailable,
        }
    }

    /// MSN video pages carry no article body; their title and description
    /// live behind a JSON detail endpoint keyed by the trailing video id.
    async fn msn_video_detail(&self, url: &Url) -> FetchOutcome {
        let Some(video_id) = url.path_segments().and_then(|mut s| s.next_back()) else {
            return FetchOutcome::Unavailable;
        };
        let api_url = format!("https://assets.msn.com/content/view/v2/Detail/en-ie/{video_id}");

        let data: serde_json::Value = match self.client.get(&api_url).send().await {
            Ok(response) => match response.json().await {
                Ok(data) => data,
                Err(error) => {
                    warn!(%error, "malformed video detail response");
                    return FetchOutcome::Unavailable;
                }
            },
            Err(error) => {
                warn!(%error, "video detail request failed");
                return FetchOutcome::Unavailable;
            }
        };

        let title = data
            .get("title")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("");
        let description = data
            .get("description")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("");

        if title.is_empty() && description.is_empty() {
            FetchOutcome::Unavailable
        } else {
            FetchOutcome::Text(format!("{title}\n\n{description}").trim().to_string())
        }
    }
}
