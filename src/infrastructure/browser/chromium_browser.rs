use std::sync::Arc;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;

use crate::application::ports::BrowserError;

use super::ChromiumPage;

/// Running browser plus the page handle for one challenge session. Keeps
/// the chromiumoxide event handler task alive for the browser's lifetime.
pub struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: ChromiumPage,
}

impl ChromiumSession {
    /// Launches a browser and opens `url`. Site isolation is disabled so
    /// injected JS can reach into the challenge frames; without it every
    /// cross-frame query comes back empty.
    pub async fn launch(url: &str, headless: bool) -> Result<Self, BrowserError> {
        let mut builder = BrowserConfig::builder().arg("--disable-site-isolation-trials");
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Protocol)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Protocol(format!("launch: {e}")))?;

        let handler_task = tokio::spawn(drive_events(handler));

        let page = browser
            .new_page(url)
            .await
            .map_err(|e| BrowserError::Protocol(format!("open page: {e}")))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| BrowserError::Protocol(format!("navigation: {e}")))?;

        Ok(Self {
            browser,
            handler_task,
            page: ChromiumPage::new(Arc::new(page)),
        })
    }

    pub fn page(&self) -> ChromiumPage {
        self.page.clone()
    }

    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!(error = %e, "Browser close failed");
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}

/// Drains the CDP event stream until it ends or yields an error. A failed
/// handler leaves every later protocol call stalling to its deadline, so the
/// terminating error is logged rather than swallowed.
pub async fn drive_events<S, E>(mut events: S)
where
    S: Stream<Item = Result<(), E>> + Unpin,
    E: std::fmt::Display,
{
    while let Some(event) = events.next().await {
        if let Err(e) = event {
            tracing::warn!(error = %e, "Browser event handler terminated");
            break;
        }
    }
}
