use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while constructing the content fetcher.
///
/// Fetching itself never fails hard: every per-URL problem degrades to
/// [`FetchOutcome::Unavailable`](super::FetchOutcome::Unavailable).
pub enum FetchError {
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Convenience result type for fetcher construction.
pub type FetchResult<T> = Result<T, FetchError>;
