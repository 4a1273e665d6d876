use std::time::Duration;

use async_trait::async_trait;

/// Handle to a single element inside a page or frame.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    async fn click(&self) -> Result<(), BrowserError>;

    async fn send_keys(&self, text: &str) -> Result<(), BrowserError>;

    /// Keyed attribute lookup; `None` when the attribute is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError>;
}

/// Capability contract over the browser-automation collaborator. A frame is
/// addressed through the same contract, scoped to its own document.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// First match for `selector`, waiting up to `timeout` for it to appear.
    async fn select(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Box<dyn ElementHandle>, BrowserError>;

    /// All matches for `selector`; with `include_frames` the search pierces
    /// nested frame documents.
    async fn select_all(
        &self,
        selector: &str,
        timeout: Duration,
        include_frames: bool,
    ) -> Result<Vec<Box<dyn ElementHandle>>, BrowserError>;

    /// First element whose text contains `text`, or `None` within `timeout`.
    async fn find_text(
        &self,
        text: &str,
        timeout: Duration,
    ) -> Result<Option<Box<dyn ElementHandle>>, BrowserError>;

    /// Page handle scoped to the first frame whose title contains
    /// `title_contains`.
    async fn frame_by_title(
        &self,
        title_contains: &str,
        timeout: Duration,
    ) -> Result<Box<dyn BrowserPage>, BrowserError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("element not found within timeout: {0}")]
    NotFound(String),
    #[error("script evaluation failed: {0}")]
    EvaluationFailed(String),
    #[error("browser protocol error: {0}")]
    Protocol(String),
}
