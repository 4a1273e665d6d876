use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::BrowserPage;

const CHECKMARK_SELECTOR: &str = ".recaptcha-checkbox-checkmark";
const TOKEN_SELECTOR: &str = "#recaptcha-token";
const DETECTION_TEXT: &str = "Try again later";

/// Read-only, never-raising queries against the live page. Every call
/// re-queries; lookup failures collapse into the sentinel results.
pub struct StatusProbes {
    page: Arc<dyn BrowserPage>,
    short_timeout: Duration,
    detection_timeout: Duration,
}

impl StatusProbes {
    pub fn new(
        page: Arc<dyn BrowserPage>,
        short_timeout: Duration,
        detection_timeout: Duration,
    ) -> Self {
        Self {
            page,
            short_timeout,
            detection_timeout,
        }
    }

    /// True only when the success checkmark carries a non-empty `style`
    /// attribute, the page's own rendering signal for "checked".
    pub async fn is_solved(&self) -> bool {
        let handles = match self
            .page
            .select_all(CHECKMARK_SELECTOR, self.short_timeout, true)
            .await
        {
            Ok(handles) => handles,
            Err(e) => {
                tracing::debug!(error = %e, "Checkmark lookup failed");
                return false;
            }
        };
        let Some(checkmark) = handles.first() else {
            return false;
        };
        match checkmark.attribute("style").await {
            Ok(Some(style)) => !style.is_empty(),
            Ok(None) => false,
            Err(e) => {
                tracing::debug!(error = %e, "Checkmark style lookup failed");
                false
            }
        }
    }

    /// True when the anti-bot banner text is present. Uses a very short
    /// timeout so the happy path is not delayed.
    pub async fn is_detected(&self) -> bool {
        match self
            .page
            .find_text(DETECTION_TEXT, self.detection_timeout)
            .await
        {
            Ok(found) => found.is_some(),
            Err(e) => {
                tracing::debug!(error = %e, "Detection probe failed");
                false
            }
        }
    }

    /// The hidden challenge token, if present.
    pub async fn token(&self) -> Option<String> {
        let handles = self
            .page
            .select_all(TOKEN_SELECTOR, self.short_timeout, true)
            .await
            .ok()?;
        let element = handles.into_iter().next()?;
        element.attribute("value").await.ok().flatten()
    }
}
