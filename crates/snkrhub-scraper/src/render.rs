//! Rendering fetch strategy — the slow path for retailers without a stable
//! API, driven through a remote headless-browser session.
//!
//! The [`PageRenderer`] / [`RendererFactory`] traits abstract over the
//! browser engine (Chromium via `chromiumoxide` in production) so the
//! per-brand sources can be exercised against canned pages, and so tests can
//! observe that every acquired session is released exactly once.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use futures::StreamExt;
use scraper::{Html, Selector};
use tokio::task::JoinHandle;

use crate::error::ScrapeError;

/// Fixed wait after navigation for dynamic storefront content to settle.
/// The storefronts render product data client-side and expose no readiness
/// signal to poll.
pub(crate) const RENDER_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// A live browser session that can load URLs and return rendered HTML.
///
/// `close` must be called exactly once on every path — success or failure —
/// before the scrape attempt's result is returned to the orchestrator.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Navigates to `url`, waits for dynamic content to settle, and returns
    /// the fully rendered HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Render`] if navigation or content capture fails.
    async fn fetch_rendered_page(&self, url: &str) -> Result<String, ScrapeError>;

    /// Releases the browser session.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Render`] if teardown fails; callers log this
    /// rather than masking the scrape result.
    async fn close(self: Box<Self>) -> Result<(), ScrapeError>;
}

/// Opens browser sessions on demand. One session per scrape attempt; the
/// sessions of concurrent article requests never alias.
#[async_trait]
pub trait RendererFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ScrapeError::Render`] if the remote browser is unreachable.
    async fn connect(&self) -> Result<Box<dyn PageRenderer>, ScrapeError>;
}

/// Session against a remote Chromium instance reachable over the DevTools
/// protocol at `host:port`.
pub struct RemoteBrowser {
    browser: Browser,
    event_loop: JoinHandle<()>,
}

impl RemoteBrowser {
    /// Connects to the remote browser's debugging endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Render`] if the endpoint is unreachable or the
    /// handshake fails.
    pub async fn connect(endpoint: &str) -> Result<Self, ScrapeError> {
        let debug_url = if endpoint.contains("://") {
            endpoint.to_owned()
        } else {
            format!("http://{endpoint}")
        };

        let (browser, mut handler) =
            Browser::connect(&debug_url)
                .await
                .map_err(|e| ScrapeError::Render {
                    url: debug_url.clone(),
                    reason: e.to_string(),
                })?;

        let event_loop = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            event_loop,
        })
    }
}

#[async_trait]
impl PageRenderer for RemoteBrowser {
    async fn fetch_rendered_page(&self, url: &str) -> Result<String, ScrapeError> {
        let render_err = |reason: String| ScrapeError::Render {
            url: url.to_owned(),
            reason,
        };

        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| render_err(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| render_err(e.to_string()))?;

        tokio::time::sleep(RENDER_SETTLE_DELAY).await;

        let html = page.content().await.map_err(|e| render_err(e.to_string()))?;

        if let Err(e) = page.close().await {
            tracing::debug!(url, error = %e, "failed to close rendered page");
        }

        Ok(html)
    }

    async fn close(self: Box<Self>) -> Result<(), ScrapeError> {
        // The remote instance is shared with other sessions: disconnect by
        // dropping the websocket, never by sending Browser.close.
        let Self {
            browser,
            event_loop,
        } = *self;
        drop(browser);
        event_loop.abort();
        Ok(())
    }
}

/// [`RendererFactory`] for a fixed remote endpoint (`host:port` from config).
pub struct RemoteBrowserFactory {
    endpoint: String,
}

impl RemoteBrowserFactory {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl RendererFactory for RemoteBrowserFactory {
    async fn connect(&self) -> Result<Box<dyn PageRenderer>, ScrapeError> {
        Ok(Box::new(RemoteBrowser::connect(&self.endpoint).await?))
    }
}

/// Collapses rendered HTML to its visible text, whitespace-joined.
/// The API-fallback path captures page text as a best-effort payload when no
/// structured schema exists.
pub(crate) fn page_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let body = Selector::parse("body").unwrap();
    doc.select(&body)
        .flat_map(|b| b.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_text_strips_markup() {
        let html = "<html><body><div>Ultra  Boost</div><p> $180 </p></body></html>";
        assert_eq!(page_text(html), "Ultra  Boost $180");
    }

    #[test]
    fn page_text_empty_body() {
        assert_eq!(page_text("<html><body></body></html>"), "");
    }
}
