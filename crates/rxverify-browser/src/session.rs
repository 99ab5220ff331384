//! Browser session lifecycle.
//!
//! One [`BrowserSession`] is shared by a whole verification batch; each
//! candidate gets its own [`PageScope`], opened before the strategy runs and
//! closed after it, whatever the outcome. The session itself is closed
//! exactly once at the end of the run.

use crate::error::{BrowserError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures_util::stream::StreamExt;
use rxverify_core::{BrowserRunConfig, ExecutionMode};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Chrome binary used in the container execution modes.
const CONTAINER_CHROME: &str = "google-chrome-stable";

/// A launched browser shared across one batch run.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a browser for the given execution mode.
    ///
    /// A launch failure here is a precondition failure for the whole batch;
    /// no candidate is processed without a session.
    ///
    /// # Errors
    /// Returns `BrowserError::Launch` if the browser cannot be started.
    pub async fn launch(mode: ExecutionMode, config: &BrowserRunConfig) -> Result<Self> {
        let browser_config = build_config(mode, config)?;

        tracing::info!(%mode, "launching verification browser");

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Drive the CDP event stream for the lifetime of the session
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a fresh page scope for one candidate.
    ///
    /// # Errors
    /// Returns `BrowserError::Page` if the browser refuses a new page.
    pub async fn open_page(&self) -> Result<PageScope> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Page(e.to_string()))?;

        Ok(PageScope { page })
    }

    /// Close the session, tearing down the browser process.
    ///
    /// Errors are logged rather than returned: by the time the session
    /// closes the batch outcome is already decided.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!(error = %e, "browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::warn!(error = %e, "browser did not exit cleanly");
        }
        self.handler_task.abort();
        tracing::info!("verification browser closed");
    }
}

/// One candidate's exclusive page within the shared session.
///
/// The owning orchestrator opens at most one scope at a time and closes it
/// on every exit path; strategies borrow the scope and never close it.
pub struct PageScope {
    pub(crate) page: Page,
}

impl PageScope {
    /// Borrow the underlying CDP page.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the page. Failures are logged; a page that refuses to close
    /// must not change a candidate's bucket.
    pub async fn close(self) {
        if let Err(e) = self.page.close().await {
            tracing::warn!(error = %e, "page close failed");
        }
    }
}

/// Map an execution mode onto concrete launch flags.
fn build_config(mode: ExecutionMode, config: &BrowserRunConfig) -> Result<BrowserConfig> {
    let builder = BrowserConfig::builder()
        .window_size(config.window_width, config.window_height)
        .request_timeout(Duration::from_secs(config.navigation_timeout_secs));

    let builder = match mode {
        ExecutionMode::Container => builder.chrome_executable(CONTAINER_CHROME),
        ExecutionMode::Devcontainer => builder.chrome_executable(CONTAINER_CHROME).no_sandbox(),
        ExecutionMode::Local => builder.with_head(),
    };

    builder.build().map_err(BrowserError::Launch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_config() -> BrowserRunConfig {
        BrowserRunConfig::default()
    }

    #[test]
    fn test_build_config_all_modes() {
        for mode in [
            ExecutionMode::Container,
            ExecutionMode::Devcontainer,
            ExecutionMode::Local,
        ] {
            assert!(
                build_config(mode, &run_config()).is_ok(),
                "config should build for {mode}"
            );
        }
    }
}
