use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::CrawlError;

/// What to do when a single page exhausts its retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RetryExhaustionPolicy {
    /// Fail the whole run with the page's error
    #[default]
    Abort,

    /// Report the failure and keep crawling the rest of the frontier
    Skip,
}

/// One crawl invocation's immutable parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlRequest {
    /// URL to start crawling from
    pub target_url: String,

    /// Maximum number of page results to collect
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Wall-clock budget for admitting new fetches, in seconds
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,

    /// Maximum number of fetches in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Fetch pages through a rendering browser instead of plain HTTP
    #[serde(default)]
    pub dynamic_rendering: bool,

    /// Retry budget for transient fetch failures on each page
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Run-level policy for pages that exhaust their retries
    #[serde(default)]
    pub on_retry_exhausted: RetryExhaustionPolicy,

    /// WebDriver endpoint used when `dynamic_rendering` is set
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

impl CrawlRequest {
    /// Create a new request with default values
    pub fn new(target_url: &str) -> Self {
        Self {
            target_url: target_url.to_string(),
            max_pages: default_max_pages(),
            time_limit_secs: default_time_limit_secs(),
            max_concurrency: default_max_concurrency(),
            dynamic_rendering: false,
            max_retries: default_max_retries(),
            on_retry_exhausted: RetryExhaustionPolicy::default(),
            webdriver_url: default_webdriver_url(),
        }
    }

    /// Load a request from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load a request from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    /// Rejects an empty or malformed seed before any work is dispatched
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.target_url.trim().is_empty() || Url::parse(&self.target_url).is_err() {
            return Err(CrawlError::InvalidTarget {
                url: self.target_url.clone(),
            });
        }
        Ok(())
    }
}

fn default_max_pages() -> usize {
    50
}

fn default_time_limit_secs() -> u64 {
    300
}

fn default_max_concurrency() -> usize {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}
