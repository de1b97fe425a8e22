use serde::{Deserialize, Serialize};

/// A successfully fetched page together with what was extracted from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// URL the page was fetched from
    pub url: String,

    /// Raw page markup
    pub content: String,

    /// Bodies of the page's script elements
    pub scripts: Vec<String>,

    /// Outbound link and form targets, as absolute URLs
    pub api_targets: Vec<String>,
}

impl PageResult {
    pub fn new(
        url: String,
        content: String,
        scripts: Vec<String>,
        api_targets: Vec<String>,
    ) -> Self {
        Self {
            url,
            content,
            scripts,
            api_targets,
        }
    }
}
