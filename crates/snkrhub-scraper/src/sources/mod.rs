//! Per-retailer product sources.
//!
//! Each brand pairs a scraper (owns the retailer's URL scheme and raw
//! response shape) with a parser (normalizes raw payloads into the canonical
//! record). A [`ProductSource`] wires one such pair behind a single call the
//! orchestrator can drive; [`SourceFactory`] resolves a brand tag to its
//! source so tests can substitute scripted implementations.

pub mod adidas;
pub mod nike;

use std::sync::Arc;

use async_trait::async_trait;
use snkrhub_core::{Brand, ShoeRecord};

use crate::error::ScrapeError;
use crate::render::{RemoteBrowserFactory, RendererFactory};

pub use adidas::AdidasSource;
pub use nike::NikeSource;

/// One retailer's scrape-and-parse capability.
#[async_trait]
pub trait ProductSource: Send + Sync {
    fn brand(&self) -> Brand;

    /// Fetches raw payloads for `article` from this retailer and parses them
    /// into a canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] on any fetch, extraction, or normalization
    /// failure; the orchestrator treats it as this brand's failure and moves
    /// on.
    async fn fetch_product(&self, article: &str) -> Result<ShoeRecord, ScrapeError>;
}

/// Resolves a brand to its product source.
pub trait SourceFactory: Send + Sync {
    fn create(&self, brand: Brand) -> Box<dyn ProductSource>;
}

/// Production wiring: real scraper/parser pairs over the real fetch clients.
///
/// Every created source builds its own API client and browser session, so
/// concurrent article requests never share fetch state.
pub struct LiveSources {
    renderer: Arc<dyn RendererFactory>,
}

impl LiveSources {
    #[must_use]
    pub fn new(browser_endpoint: &str) -> Self {
        Self {
            renderer: Arc::new(RemoteBrowserFactory::new(browser_endpoint)),
        }
    }
}

impl SourceFactory for LiveSources {
    fn create(&self, brand: Brand) -> Box<dyn ProductSource> {
        match brand {
            Brand::Adidas => Box::new(AdidasSource::new(Arc::clone(&self.renderer))),
            Brand::Nike => Box::new(NikeSource::new(Arc::clone(&self.renderer))),
        }
    }
}
