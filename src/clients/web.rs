use async_trait::async_trait;
use fantoccini::ClientBuilder;
use reqwest::StatusCode;

use crate::clients::FetchClient;
use crate::error::FetchError;

/// Production fetch client: `reqwest` for static pages, a WebDriver
/// session via `fantoccini` for rendered ones.
#[derive(Debug, Clone)]
pub struct WebFetcher {
    http: reqwest::Client,
    webdriver_url: String,
}

impl WebFetcher {
    pub fn new(webdriver_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            webdriver_url: webdriver_url.to_string(),
        }
    }

    pub fn with_http_client(http: reqwest::Client, webdriver_url: &str) -> Self {
        Self {
            http,
            webdriver_url: webdriver_url.to_string(),
        }
    }
}

#[async_trait]
impl FetchClient for WebFetcher {
    async fn fetch_static(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(classify_http_error)?
            .error_for_status()
            .map_err(classify_http_error)?;

        response.text().await.map_err(classify_http_error)
    }

    async fn fetch_rendered(&self, url: &str) -> Result<String, FetchError> {
        ::log::debug!("Connecting to WebDriver at {}", self.webdriver_url);
        let client = ClientBuilder::native()
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| {
                FetchError::Transient(format!(
                    "failed to connect to WebDriver at {}: {e}",
                    self.webdriver_url
                ))
            })?;

        let outcome = async {
            client
                .goto(url)
                .await
                .map_err(|e| FetchError::Transient(format!("navigation failed: {e}")))?;
            client
                .source()
                .await
                .map_err(|e| FetchError::Transient(format!("page source failed: {e}")))
        }
        .await;

        // Session cleanup happens regardless of the fetch outcome
        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        outcome
    }
}

/// 5xx and 429 responses plus network-level faults are worth retrying;
/// other status errors are not
fn classify_http_error(err: reqwest::Error) -> FetchError {
    if let Some(status) = err.status() {
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            FetchError::Transient(err.to_string())
        } else {
            FetchError::Permanent(err.to_string())
        }
    } else if err.is_builder() {
        FetchError::Permanent(err.to_string())
    } else {
        // Timeouts, connection resets, interrupted bodies
        FetchError::Transient(err.to_string())
    }
}
