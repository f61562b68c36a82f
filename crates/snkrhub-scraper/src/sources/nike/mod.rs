//! Nike: render-based source. The site has no stable product API, so every
//! fetch drives the remote headless browser through a two-stage navigation:
//! search results scoped by article id, then the first match's product page.

mod extract;
mod parser;

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use snkrhub_core::{Brand, ShoeRecord};

use crate::error::ScrapeError;
use crate::render::{PageRenderer, RendererFactory};
use crate::sources::ProductSource;

pub use extract::{NikeRawProduct, NikeSizeEntry};
pub use parser::NikeParser;

const NIKE_ORIGIN: &str = "https://www.nike.com";

fn search_url(article: &str) -> String {
    let encoded = utf8_percent_encode(article, NON_ALPHANUMERIC);
    format!("{NIKE_ORIGIN}/w?q={encoded}&vst={encoded}")
}

/// Resolves search-result hrefs, which the site renders host-relative.
fn absolutize(href: &str) -> String {
    if href.starts_with('/') {
        format!("{NIKE_ORIGIN}{href}")
    } else {
        href.to_owned()
    }
}

/// Fetches the raw Nike field set for one article over a borrowed browser
/// session. The caller owns the session and releases it.
pub struct NikeScraper<'a> {
    renderer: &'a dyn PageRenderer,
    article: String,
}

impl<'a> NikeScraper<'a> {
    pub fn new(renderer: &'a dyn PageRenderer, article: &str) -> Self {
        Self {
            renderer,
            article: article.to_owned(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ScrapeError::Render`] when a page fails to render and
    /// [`ScrapeError::Extraction`] when expected markup is absent.
    pub async fn fetch_raw_product(&self) -> Result<NikeRawProduct, ScrapeError> {
        let search_html = self
            .renderer
            .fetch_rendered_page(&search_url(&self.article))
            .await?;
        let product_url = absolutize(&extract::product_href(&search_html)?);

        tracing::debug!(brand = %Brand::Nike, article = %self.article, url = %product_url, "resolved product page");

        let product_html = self.renderer.fetch_rendered_page(&product_url).await?;
        extract::raw_product(&product_html, product_url)
    }
}

/// The Nike scraper/parser pair behind the [`ProductSource`] seam.
pub struct NikeSource {
    renderer: Arc<dyn RendererFactory>,
}

impl NikeSource {
    #[must_use]
    pub fn new(renderer: Arc<dyn RendererFactory>) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl ProductSource for NikeSource {
    fn brand(&self) -> Brand {
        Brand::Nike
    }

    async fn fetch_product(&self, article: &str) -> Result<ShoeRecord, ScrapeError> {
        let session = self.renderer.connect().await?;

        let raw = NikeScraper::new(session.as_ref(), article)
            .fetch_raw_product()
            .await;

        // Session release happens exactly once, before the raw result is
        // inspected.
        if let Err(e) = session.close().await {
            tracing::warn!(brand = %Brand::Nike, error = %e, "failed to release browser session");
        }

        NikeParser::new(raw?, article).product_data()
    }
}
