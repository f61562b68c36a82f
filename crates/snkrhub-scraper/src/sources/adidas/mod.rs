//! Adidas: API-based source with a rendered-page fallback.

mod parser;
mod types;

use std::sync::Arc;

use async_trait::async_trait;
use snkrhub_core::{Brand, ShoeRecord};

use crate::client::ApiClient;
use crate::error::ScrapeError;
use crate::render::{page_text, RendererFactory};
use crate::sources::ProductSource;

pub use parser::AdidasParser;
pub use types::{
    AdidasAvailability, AdidasProductInfo, AdidasRawAvailability, AdidasRawProduct, RawPrice,
};

const ADIDAS_API_BASE: &str = "https://www.adidas.com/api/products";
pub(crate) const ADIDAS_ORIGIN: &str = "https://www.adidas.com";

/// Fetches raw Adidas payloads for one article.
///
/// The product API is deterministic from the article id. On any API failure
/// the scraper falls back to rendering the same URL in the remote browser
/// and returns the visible page text — there is no structured fallback
/// schema, so the payload is best-effort.
pub struct AdidasScraper<'a> {
    api: &'a ApiClient,
    renderer: &'a dyn RendererFactory,
    product_url: String,
}

impl<'a> AdidasScraper<'a> {
    pub fn new(
        api: &'a ApiClient,
        renderer: &'a dyn RendererFactory,
        api_base: &str,
        article: &str,
    ) -> Self {
        Self {
            api,
            renderer,
            product_url: format!("{api_base}/{article}"),
        }
    }

    /// # Errors
    ///
    /// Returns [`ScrapeError`] when both the API and the rendering fallback
    /// fail.
    pub async fn fetch_raw_product(&self) -> Result<AdidasRawProduct, ScrapeError> {
        match self.api.get::<AdidasProductInfo>(&self.product_url).await {
            Ok(info) => Ok(AdidasRawProduct::Api(info)),
            Err(e) => {
                tracing::warn!(
                    brand = %Brand::Adidas,
                    url = %self.product_url,
                    error = %e,
                    "product API failed; falling back to rendered page"
                );
                let text = self.render_fallback(&self.product_url).await?;
                Ok(AdidasRawProduct::PageText(text))
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`ScrapeError`] when both the API and the rendering fallback
    /// fail.
    pub async fn fetch_raw_availability(&self) -> Result<AdidasRawAvailability, ScrapeError> {
        let url = format!("{}/availability", self.product_url);
        match self.api.get::<AdidasAvailability>(&url).await {
            Ok(availability) => Ok(AdidasRawAvailability::Api(availability)),
            Err(e) => {
                tracing::warn!(
                    brand = %Brand::Adidas,
                    url = %url,
                    error = %e,
                    "availability API failed; falling back to rendered page"
                );
                let text = self.render_fallback(&url).await?;
                Ok(AdidasRawAvailability::PageText(text))
            }
        }
    }

    /// Renders `url` in a fresh browser session and returns its visible text.
    /// The session is released before the result is returned, error or not.
    async fn render_fallback(&self, url: &str) -> Result<String, ScrapeError> {
        let session = self.renderer.connect().await?;
        let fetched = session.fetch_rendered_page(url).await;
        if let Err(e) = session.close().await {
            tracing::warn!(url, error = %e, "failed to release browser session");
        }
        Ok(page_text(&fetched?))
    }
}

/// The Adidas scraper/parser pair behind the [`ProductSource`] seam.
pub struct AdidasSource {
    api_base: String,
    renderer: Arc<dyn RendererFactory>,
}

impl AdidasSource {
    #[must_use]
    pub fn new(renderer: Arc<dyn RendererFactory>) -> Self {
        Self::with_api_base(renderer, ADIDAS_API_BASE)
    }

    /// Points the source at a different API host (local stub servers,
    /// proxies).
    #[must_use]
    pub fn with_api_base(renderer: Arc<dyn RendererFactory>, api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            renderer,
        }
    }
}

#[async_trait]
impl ProductSource for AdidasSource {
    fn brand(&self) -> Brand {
        Brand::Adidas
    }

    async fn fetch_product(&self, article: &str) -> Result<ShoeRecord, ScrapeError> {
        let api = ApiClient::new()?;
        let scraper = AdidasScraper::new(&api, self.renderer.as_ref(), &self.api_base, article);

        let product = scraper.fetch_raw_product().await?;
        let availability = scraper.fetch_raw_availability().await?;

        AdidasParser::new(product, availability).product_data()
    }
}
