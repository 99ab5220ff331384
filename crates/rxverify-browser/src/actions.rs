//! Page actions used by verification strategies.
//!
//! Thin wrappers over the CDP page that translate automation failures into
//! [`BrowserError`] values a strategy can surface.

use crate::error::{BrowserError, Result};
use crate::session::PageScope;
use chromiumoxide::element::Element;
use std::time::Duration;
use tokio::time::Instant;

/// How often to re-check for a selector while waiting.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

impl PageScope {
    /// Navigate to a URL and wait for the load to settle.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation(format!("{url}: {e}")))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| BrowserError::Navigation(format!("{url}: {e}")))?;
        Ok(())
    }

    /// Find an element right now, without waiting.
    pub async fn find(&self, selector: &str) -> Result<Element> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))
    }

    /// Whether a selector currently matches anything on the page.
    pub async fn exists(&self, selector: &str) -> bool {
        self.page.find_element(selector).await.is_ok()
    }

    /// Wait for a selector to appear, polling until the timeout.
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<Element> {
        let deadline = Instant::now() + timeout;

        loop {
            match self.page.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(_) if Instant::now() < deadline => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                Err(_) => {
                    return Err(BrowserError::Timeout(format!(
                        "selector '{selector}' not found within {timeout:?}"
                    )));
                }
            }
        }
    }

    /// Type a value into a form field.
    pub async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let element = self.find(selector).await?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::Page(format!("focus '{selector}': {e}")))?;
        element
            .type_str(value)
            .await
            .map_err(|e| BrowserError::Page(format!("type into '{selector}': {e}")))?;
        Ok(())
    }

    /// Click an element.
    pub async fn click(&self, selector: &str) -> Result<()> {
        let element = self.find(selector).await?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::Page(format!("click '{selector}': {e}")))?;
        Ok(())
    }

    /// Extract the trimmed inner text of an element.
    pub async fn extract_text(&self, selector: &str) -> Result<String> {
        let element = self.find(selector).await?;
        let text = element
            .inner_text()
            .await
            .map_err(|e| BrowserError::Page(format!("read '{selector}': {e}")))?;
        Ok(text.unwrap_or_default().trim().to_string())
    }
}
