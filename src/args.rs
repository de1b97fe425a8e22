use clap::Parser;
use std::path::PathBuf;

use crawl_bound::{CrawlRequest, RetryExhaustionPolicy};

#[derive(Parser, Debug)]
#[command(name = "crawl-bound")]
#[command(about = "Crawls a website within page, time and concurrency budgets")]
#[command(version)]
pub struct Args {
    /// Seed URL to start crawling from
    pub url: String,

    /// Maximum number of pages to collect
    #[arg(short = 'p', long, default_value_t = 50)]
    pub max_pages: usize,

    /// Time limit in seconds for admitting new fetches
    #[arg(short = 't', long, default_value_t = 300)]
    pub time_limit: u64,

    /// Number of concurrent fetches
    #[arg(short, long, default_value_t = 5)]
    pub concurrency: usize,

    /// Fetch pages through a rendering browser (requires a WebDriver server)
    #[arg(short, long)]
    pub dynamic: bool,

    /// WebDriver endpoint for dynamic rendering
    #[arg(long, default_value = "http://localhost:4444")]
    pub webdriver_url: String,

    /// Keep crawling when a page exhausts its retries instead of aborting
    #[arg(long)]
    pub skip_failed: bool,

    /// Write the collected pages to this file as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn to_request(&self) -> CrawlRequest {
        let mut request = CrawlRequest::new(&self.url);
        request.max_pages = self.max_pages;
        request.time_limit_secs = self.time_limit;
        request.max_concurrency = self.concurrency;
        request.dynamic_rendering = self.dynamic;
        request.webdriver_url = self.webdriver_url.clone();
        request.on_retry_exhausted = if self.skip_failed {
            RetryExhaustionPolicy::Skip
        } else {
            RetryExhaustionPolicy::Abort
        };
        request
    }
}
