//! Shared test doubles for the browser-rendering seam.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use snkrhub_scraper::{PageRenderer, RendererFactory, ScrapeError};

/// A renderer serving canned HTML keyed by URL. Counts how many sessions
/// were opened and closed so tests can assert release-exactly-once.
pub struct CannedRenderer {
    pages: Arc<HashMap<String, String>>,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl PageRenderer for CannedRenderer {
    async fn fetch_rendered_page(&self, url: &str) -> Result<String, ScrapeError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Render {
                url: url.to_owned(),
                reason: "no canned page for url".to_string(),
            })
    }

    async fn close(self: Box<Self>) -> Result<(), ScrapeError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct CannedFactory {
    pages: Arc<HashMap<String, String>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl CannedFactory {
    pub fn new(pages: &[(&str, &str)]) -> Arc<Self> {
        let pages = pages
            .iter()
            .map(|(url, html)| ((*url).to_string(), (*html).to_string()))
            .collect();
        Arc::new(Self {
            pages: Arc::new(pages),
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn opens(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RendererFactory for CannedFactory {
    async fn connect(&self) -> Result<Box<dyn PageRenderer>, ScrapeError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CannedRenderer {
            pages: Arc::clone(&self.pages),
            closes: Arc::clone(&self.closed),
        }))
    }
}
