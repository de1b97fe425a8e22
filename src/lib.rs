//! Budget-bounded concurrent website crawler.
//!
//! Starting from a seed URL, the engine fetches pages concurrently up to a
//! configured page budget and time limit, extracts outbound links to grow
//! the crawl frontier, and returns the collected page results. Each
//! distinct URL is fetched at most once per run; transient fetch failures
//! are retried with exponential backoff.
//!
//! ```no_run
//! use crawl_bound::Crawl;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> Result<(), crawl_bound::CrawlError> {
//! let pages = Crawl::new("https://example.com")
//!     .with_max_pages(20)
//!     .with_max_concurrency(4)
//!     .run(CancellationToken::new())
//!     .await?;
//! println!("collected {} pages", pages.len());
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod config;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod extract;
pub mod frontier;
pub mod observer;
pub mod results;
pub mod retry;

// Re-export commonly used types for convenience
pub use clients::{FetchClient, WebFetcher};
pub use config::{CrawlRequest, RetryExhaustionPolicy};
pub use engine::CrawlEngine;
pub use error::{CrawlError, FetchError};
pub use observer::{CrawlObserver, LogObserver, NullObserver};
pub use results::PageResult;

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Builder for configuring and running one crawl
pub struct Crawl {
    request: CrawlRequest,
}

impl Crawl {
    /// Create a new crawl seeded at the given URL, with default limits
    pub fn new(target_url: &str) -> Self {
        Self {
            request: CrawlRequest::new(target_url),
        }
    }

    /// Start from an already-built request
    pub fn from_request(request: CrawlRequest) -> Self {
        Self { request }
    }

    /// Set the maximum number of page results to collect
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.request.max_pages = max_pages;
        self
    }

    /// Set the wall-clock budget for admitting new fetches
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.request.time_limit_secs = limit.as_secs();
        self
    }

    /// Set the maximum number of fetches in flight at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.request.max_concurrency = max_concurrency;
        self
    }

    /// Fetch pages through a rendering browser instead of plain HTTP
    pub fn with_dynamic_rendering(mut self, dynamic: bool) -> Self {
        self.request.dynamic_rendering = dynamic;
        self
    }

    /// Set the WebDriver endpoint used for rendered fetches
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.request.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Set the per-page retry budget for transient fetch failures
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.request.max_retries = max_retries;
        self
    }

    /// Choose whether a page that exhausts its retries fails the run
    pub fn with_retry_exhaustion_policy(mut self, policy: RetryExhaustionPolicy) -> Self {
        self.request.on_retry_exhausted = policy;
        self
    }

    pub fn request(&self) -> &CrawlRequest {
        &self.request
    }

    /// Run the crawl with the production fetch client and log reporting
    pub async fn run(self, cancel: CancellationToken) -> Result<Vec<PageResult>, CrawlError> {
        let client = Arc::new(WebFetcher::new(&self.request.webdriver_url));
        let engine = CrawlEngine::with_observer(client, Arc::new(LogObserver));
        engine.run(&self.request, cancel).await
    }
}
