//! Markup extraction for Nike's rendered pages.
//!
//! Extraction stops at raw strings: the parser owns normalization. A missing
//! selector fails loudly, naming the selector, so markup drift is diagnosable
//! from the error alone.

use scraper::{Html, Selector};
use snkrhub_core::Brand;

use crate::error::ScrapeError;

pub(super) const SEARCH_RESULT_LINK: &str = "div.product-card__body a[href]";
pub(super) const HERO_IMAGE: &str = "div#hero-image img";
pub(super) const HERO_IMAGE_SRC: &str = "div#hero-image img[src]";
pub(super) const HERO_IMAGE_ALT: &str = "div#hero-image img[alt]";
pub(super) const PRICE_CONTAINER: &str = "div#price-container";
pub(super) const DESCRIPTION: &str = "p[data-testid=\"product-description\"]";
pub(super) const SIZE_GRID_ENTRY: &str = "div.pdp-grid-selector-grid > div";

/// HTML-derived field set for one Nike product page, prior to normalization.
#[derive(Debug)]
pub struct NikeRawProduct {
    pub product_url: String,
    pub name: String,
    pub image: String,
    /// Price text as rendered, e.g. `"$129.99"`.
    pub price_text: String,
    pub description: Option<String>,
    pub sizes: Vec<NikeSizeEntry>,
}

/// One entry of the size-selector grid.
#[derive(Debug)]
pub struct NikeSizeEntry {
    pub label: String,
    /// `true` when the grid marks the size unavailable.
    pub disabled: bool,
}

fn sel(css: &'static str) -> Selector {
    Selector::parse(css).unwrap()
}

fn not_found(selector: &'static str) -> ScrapeError {
    ScrapeError::Extraction {
        brand: Brand::Nike,
        selector,
    }
}

/// Pulls the first matching product's href out of a search-results page.
///
/// # Errors
///
/// Returns [`ScrapeError::Extraction`] when no product card is present.
pub(super) fn product_href(search_html: &str) -> Result<String, ScrapeError> {
    let doc = Html::parse_document(search_html);
    doc.select(&sel(SEARCH_RESULT_LINK))
        .find_map(|a| a.value().attr("href"))
        .map(str::to_owned)
        .ok_or_else(|| not_found(SEARCH_RESULT_LINK))
}

/// Extracts the raw field set from a rendered product page.
///
/// # Errors
///
/// Returns [`ScrapeError::Extraction`] naming the first selector that did
/// not match. The description is the only optional region.
pub(super) fn raw_product(
    product_html: &str,
    product_url: String,
) -> Result<NikeRawProduct, ScrapeError> {
    let doc = Html::parse_document(product_html);

    let image_el = doc
        .select(&sel(HERO_IMAGE))
        .next()
        .ok_or_else(|| not_found(HERO_IMAGE))?;
    let image = image_el
        .value()
        .attr("src")
        .ok_or_else(|| not_found(HERO_IMAGE_SRC))?
        .to_owned();
    let name = image_el
        .value()
        .attr("alt")
        .ok_or_else(|| not_found(HERO_IMAGE_ALT))?
        .to_owned();

    let price_text = doc
        .select(&sel(PRICE_CONTAINER))
        .next()
        .ok_or_else(|| not_found(PRICE_CONTAINER))?
        .text()
        .collect::<String>()
        .trim()
        .to_owned();

    let description = doc
        .select(&sel(DESCRIPTION))
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .filter(|text| !text.is_empty());

    let sizes = doc
        .select(&sel(SIZE_GRID_ENTRY))
        .map(|entry| {
            let disabled = entry.value().classes().any(|class| class == "disabled");
            let label = entry
                .select(&sel("label"))
                .next()
                .map(|l| l.text().collect::<String>().trim().to_owned())
                .unwrap_or_default();
            NikeSizeEntry { label, disabled }
        })
        .collect();

    Ok(NikeRawProduct {
        product_url,
        name,
        image,
        price_text,
        description,
        sizes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
        <html><body>
          <div class="product-card__body">
            <a href="/t/air-max-90/DX1234">Air Max 90</a>
          </div>
          <div class="product-card__body">
            <a href="/t/other/XY0001">Other</a>
          </div>
        </body></html>"#;

    const PRODUCT_PAGE: &str = r#"
        <html><body>
          <div id="hero-image">
            <img src="https://static.nike.com/air-max-90.png" alt="Air Max 90" />
          </div>
          <div id="price-container"><span>$129.99</span></div>
          <p data-testid="product-description">The original look.</p>
          <div class="pdp-grid-selector-grid">
            <div class="size-cell"><label>9 M</label></div>
            <div class="size-cell"><label>9.5 M</label></div>
            <div class="size-cell disabled"><label>10 M</label></div>
          </div>
        </body></html>"#;

    #[test]
    fn product_href_takes_first_card() {
        assert_eq!(product_href(SEARCH_PAGE).unwrap(), "/t/air-max-90/DX1234");
    }

    #[test]
    fn product_href_missing_card_names_selector() {
        let err = product_href("<html><body></body></html>").unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::Extraction { selector, .. } if selector == SEARCH_RESULT_LINK
        ));
    }

    #[test]
    fn raw_product_extracts_all_fields() {
        let raw = raw_product(PRODUCT_PAGE, "https://www.nike.com/t/air-max-90/DX1234".into())
            .unwrap();
        assert_eq!(raw.name, "Air Max 90");
        assert_eq!(raw.image, "https://static.nike.com/air-max-90.png");
        assert_eq!(raw.price_text, "$129.99");
        assert_eq!(raw.description.as_deref(), Some("The original look."));
        assert_eq!(raw.sizes.len(), 3);
        assert!(!raw.sizes[0].disabled);
        assert_eq!(raw.sizes[2].label, "10 M");
        assert!(raw.sizes[2].disabled);
    }

    #[test]
    fn raw_product_missing_hero_image_names_selector() {
        let html = r#"<html><body><div id="price-container">$1</div></body></html>"#;
        let err = raw_product(html, String::new()).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::Extraction { selector, .. } if selector == HERO_IMAGE
        ));
    }

    #[test]
    fn raw_product_missing_price_names_selector() {
        let html = r#"
            <html><body>
              <div id="hero-image"><img src="x.png" alt="X" /></div>
            </body></html>"#;
        let err = raw_product(html, String::new()).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::Extraction { selector, .. } if selector == PRICE_CONTAINER
        ));
    }

    #[test]
    fn raw_product_description_is_optional() {
        let html = r#"
            <html><body>
              <div id="hero-image"><img src="x.png" alt="X" /></div>
              <div id="price-container">$90</div>
            </body></html>"#;
        let raw = raw_product(html, String::new()).unwrap();
        assert_eq!(raw.description, None);
        assert!(raw.sizes.is_empty());
    }
}
