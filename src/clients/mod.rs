pub mod web;

use async_trait::async_trait;

use crate::error::FetchError;

pub use web::WebFetcher;

/// Fetch collaborator the engine drives; one method per transport.
///
/// Implementations classify failures as `Transient` (retryable) or
/// `Permanent`; that distinction is what the retry policy acts on.
#[async_trait]
pub trait FetchClient: Send + Sync {
    /// Fetch raw markup over plain HTTP
    async fn fetch_static(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch browser-rendered markup; slower, heavier
    async fn fetch_rendered(&self, url: &str) -> Result<String, FetchError>;
}
