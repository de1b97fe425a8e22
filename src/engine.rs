use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::clients::FetchClient;
use crate::config::{CrawlRequest, RetryExhaustionPolicy};
use crate::dedup::VisitedSet;
use crate::error::CrawlError;
use crate::extract;
use crate::frontier::Frontier;
use crate::observer::{CrawlObserver, NullObserver};
use crate::results::PageResult;
use crate::retry::fetch_with_retry;

/// Crawl scheduling engine.
///
/// Owns the frontier, the visited set, the concurrency limiter and the
/// termination policy; fetching and reporting are delegated to the
/// injected collaborators.
pub struct CrawlEngine {
    client: Arc<dyn FetchClient>,
    observer: Arc<dyn CrawlObserver>,
}

impl CrawlEngine {
    pub fn new(client: Arc<dyn FetchClient>) -> Self {
        Self {
            client,
            observer: Arc::new(NullObserver),
        }
    }

    pub fn with_observer(client: Arc<dyn FetchClient>, observer: Arc<dyn CrawlObserver>) -> Self {
        Self { client, observer }
    }

    /// Runs one crawl to completion and returns the collected pages.
    ///
    /// The run stops admitting new fetches when the frontier stays empty
    /// with nothing in flight, the page budget is reached, the time limit
    /// elapses, or `cancel` fires; in-flight work is always drained before
    /// returning. Cancellation yields the partial result collection, not
    /// an error.
    pub async fn run(
        &self,
        request: &CrawlRequest,
        cancel: CancellationToken,
    ) -> Result<Vec<PageResult>, CrawlError> {
        request.validate()?;
        ::log::info!("Starting crawl of {}", request.target_url);

        let frontier = Arc::new(Frontier::new());
        let visited = Arc::new(VisitedSet::new());
        let results: Arc<Mutex<Vec<PageResult>>> = Arc::new(Mutex::new(Vec::new()));
        let fatal: Arc<Mutex<Option<CrawlError>>> = Arc::new(Mutex::new(None));

        // Seed: the target enters the visited set and the frontier in one step
        visited.admit(&request.target_url);
        frontier.push(request.target_url.clone());

        let semaphore = Arc::new(Semaphore::new(request.max_concurrency.max(1)));
        let run_cancel = cancel.child_token();
        let started = Instant::now();
        let mut in_flight: JoinSet<()> = JoinSet::new();

        loop {
            if run_cancel.is_cancelled() || fatal.lock().unwrap().is_some() {
                break;
            }
            if started.elapsed() > request.time_limit() {
                ::log::info!("Crawl time limit exceeded, no further fetches admitted");
                break;
            }
            if results.lock().unwrap().len() >= request.max_pages {
                break;
            }

            let Some(url) = frontier.pop() else {
                // An empty frontier with work in flight may still grow;
                // wait for one work unit and re-check
                if in_flight.join_next().await.is_none() {
                    break;
                }
                continue;
            };

            // An empty URL in the frontier is a defect, never fetched
            if url.trim().is_empty() {
                run_cancel.cancel();
                while in_flight.join_next().await.is_some() {}
                return Err(CrawlError::InvalidTarget { url });
            }

            // The sole backpressure point: the coordinator waits here, in
            // series, until one of the fetch slots frees up
            let permit = tokio::select! {
                permit = Arc::clone(&semaphore).acquire_owned() => permit.unwrap(),
                _ = run_cancel.cancelled() => break,
            };

            let client = Arc::clone(&self.client);
            let observer = Arc::clone(&self.observer);
            let frontier = Arc::clone(&frontier);
            let visited = Arc::clone(&visited);
            let results = Arc::clone(&results);
            let fatal = Arc::clone(&fatal);
            let worker_cancel = run_cancel.clone();
            let dynamic = request.dynamic_rendering;
            let max_retries = request.max_retries;
            let max_pages = request.max_pages;
            let policy = request.on_retry_exhausted;

            in_flight.spawn(async move {
                // Slot is released when the permit drops, on every exit path
                let _permit = permit;

                let fetch = || {
                    let client = Arc::clone(&client);
                    let url = url.clone();
                    async move {
                        if dynamic {
                            client.fetch_rendered(&url).await
                        } else {
                            client.fetch_static(&url).await
                        }
                    }
                };

                let content =
                    match fetch_with_retry(&url, max_retries, &worker_cancel, fetch).await {
                        Ok(content) => content,
                        Err(CrawlError::Cancelled) => return,
                        Err(err) => {
                            observer.on_page_failed(&url, &err);
                            if policy == RetryExhaustionPolicy::Abort {
                                let mut slot = fatal.lock().unwrap();
                                if slot.is_none() {
                                    *slot = Some(err);
                                }
                                drop(slot);
                                worker_cancel.cancel();
                            }
                            return;
                        }
                    };

                let scripts = extract::extract_scripts(&content);
                let links = extract::extract_links(&content, &url);

                if !content.is_empty() {
                    let mut collected = results.lock().unwrap();
                    // Hard cap at append time keeps len(results) <= max_pages
                    // even with work in flight when the budget fills
                    if collected.len() < max_pages {
                        collected.push(PageResult::new(
                            url.clone(),
                            content,
                            scripts,
                            links.clone(),
                        ));
                        observer.on_page_fetched(&url, collected.len());
                    }
                }

                for link in links {
                    // Advisory bound on admission of new frontier entries
                    if results.lock().unwrap().len() >= max_pages {
                        break;
                    }
                    if visited.admit(&link) {
                        frontier.push(link.clone());
                        observer.on_link_enqueued(&link);
                    }
                }
            });
        }

        // Drain everything still in flight before returning
        while in_flight.join_next().await.is_some() {}

        if let Some(err) = fatal.lock().unwrap().take() {
            return Err(err);
        }

        let pages = std::mem::take(&mut *results.lock().unwrap());
        self.observer.on_run_complete(pages.len(), started.elapsed());
        Ok(pages)
    }
}
