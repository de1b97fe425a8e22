use std::time::Duration;

use crate::error::CrawlError;

/// Reporting hooks the engine invokes at defined points.
///
/// All reporting goes through this trait rather than inline side effects
/// in the scheduling path, so callers can swap in progress displays or
/// measurements without touching the engine.
pub trait CrawlObserver: Send + Sync {
    /// A page was fetched and appended to the result collection
    fn on_page_fetched(&self, _url: &str, _total_so_far: usize) {}

    /// A freshly admitted link was pushed onto the frontier
    fn on_link_enqueued(&self, _url: &str) {}

    /// A page's processing ended in a terminal failure
    fn on_page_failed(&self, _url: &str, _error: &CrawlError) {}

    /// The run drained its in-flight work and is about to return
    fn on_run_complete(&self, _pages: usize, _elapsed: Duration) {}
}

/// Default observer that reports through the `log` facade
#[derive(Debug, Default)]
pub struct LogObserver;

impl CrawlObserver for LogObserver {
    fn on_page_fetched(&self, url: &str, total_so_far: usize) {
        ::log::info!("Fetched page {}: {}", total_so_far, url);
    }

    fn on_link_enqueued(&self, url: &str) {
        ::log::debug!("Queued link for crawling: {}", url);
    }

    fn on_page_failed(&self, url: &str, error: &CrawlError) {
        ::log::warn!("Failed to fetch {}: {}", url, error);
    }

    fn on_run_complete(&self, pages: usize, elapsed: Duration) {
        ::log::info!(
            "Crawl complete - collected {} pages in {:.2} seconds",
            pages,
            elapsed.as_secs_f64()
        );
    }
}

/// Observer that discards every event; useful when embedding the engine
#[derive(Debug, Default)]
pub struct NullObserver;

impl CrawlObserver for NullObserver {}
