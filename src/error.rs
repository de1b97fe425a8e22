use thiserror::Error;

/// Terminal errors surfaced to the caller of a crawl run
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL was empty or malformed, or an empty URL reached the
    /// engine from the frontier (a defect, never silently fetched)
    #[error("invalid or empty target URL: {url:?}")]
    InvalidTarget { url: String },

    /// A single page exhausted its retry budget on transient failures
    #[error("retry limit exceeded for {url} after {attempts} attempts")]
    RetryLimitExceeded { url: String, attempts: u32 },

    /// A non-transient fault while processing a single page
    #[error("failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The run's cancellation signal fired
    #[error("crawl cancelled")]
    Cancelled,
}

/// Failure class reported by fetch collaborators.
///
/// The retry policy retries `Transient` failures and propagates
/// `Permanent` ones immediately.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Likely to succeed on retry: network faults, timeouts, 5xx responses
    #[error("transient fetch failure: {0}")]
    Transient(String),

    /// Never retried: malformed requests, 4xx responses, protocol errors
    #[error("permanent fetch failure: {0}")]
    Permanent(String),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient(_))
    }
}
