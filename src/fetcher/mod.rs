//! Page fetching.
//!
//! [`BrowserFetcher`] drives one long-lived headless-Chrome session: every
//! fetch navigates a browser page first so client-side rendering can settle,
//! then retrieves the document body with a plain GET carrying the configured
//! client identifier. The session is acquired with [`BrowserFetcher::launch`]
//! and must be released with [`BrowserFetcher::close`] once all queries are
//! done.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::app::{Result, SkyfareError};
use crate::config::FetchConfig;

/// Trait for page retrieval implementations.
///
/// Errors propagate to the caller as-is; retry policy belongs to the
/// extraction layer, not here.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Retrieve the HTML body of a results page.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Chrome-backed fetcher using chromiumoxide plus a reqwest client.
pub struct BrowserFetcher {
    browser: Browser,
    handler_task: JoinHandle<()>,
    client: Client,
    config: FetchConfig,
}

impl BrowserFetcher {
    /// Launch the browser session and build the HTTP client.
    pub async fn launch(config: &FetchConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| SkyfareError::Browser(format!("failed to build browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            SkyfareError::Browser(format!(
                "failed to launch browser: {e}. Is Chrome or Chromium installed and in PATH?"
            ))
        })?;

        // Drive browser events until the session is closed
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            browser,
            handler_task,
            client,
            config: config.clone(),
        })
    }

    /// Release the browser session.
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| SkyfareError::Browser(format!("failed to close browser: {e}")))?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }

    async fn render(&self, url: &str) -> Result<()> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| SkyfareError::Browser(format!("failed to create page: {e}")))?;

        page.set_user_agent(&self.config.user_agent)
            .await
            .map_err(|e| SkyfareError::Browser(format!("failed to set user agent: {e}")))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| SkyfareError::Browser(format!("navigation failed: {e}")))?;

        // Additional wait for dynamic content
        tokio::time::sleep(self.config.wait_after_load()).await;

        page.close()
            .await
            .map_err(|e| SkyfareError::Browser(format!("failed to close page: {e}")))?;

        Ok(())
    }
}

/// Bound `fut` by `limit`; expiry surfaces as a browser error naming `what`.
///
/// The reqwest client carries its own timeout, but the chromiumoxide calls
/// do not, so the render step needs this wrapper for the configured policy
/// to cover it.
async fn bounded<T>(limit: Duration, what: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| SkyfareError::Browser(format!("{what} timed out after {limit:?}")))?
}

#[async_trait]
impl Fetch for BrowserFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        bounded(self.config.timeout(), "page render", self.render(url)).await?;

        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;
        let body = response.text().await?;

        Ok(body)
    }
}
