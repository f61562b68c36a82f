//! Normalization from raw Adidas payloads to the canonical record.

use snkrhub_core::{Brand, ShoeRecord};

use crate::error::ScrapeError;
use crate::normalize::{normalize_size, parse_price, sort_sizes};

use super::types::{AdidasRawAvailability, AdidasRawProduct};
use super::ADIDAS_ORIGIN;

const IN_STOCK: &str = "IN_STOCK";

/// Builds the canonical record from one product payload and one availability
/// payload. Required fields that are absent fail with a named
/// missing-field error — a malformed source document must never produce a
/// corrupted record.
pub struct AdidasParser {
    product: AdidasRawProduct,
    availability: AdidasRawAvailability,
}

impl AdidasParser {
    #[must_use]
    pub fn new(product: AdidasRawProduct, availability: AdidasRawAvailability) -> Self {
        Self {
            product,
            availability,
        }
    }

    /// # Errors
    ///
    /// - [`ScrapeError::MissingField`] — a required key is absent from the
    ///   payload, or the payload is rendered page text (the fallback payload
    ///   carries no structured fields).
    /// - [`ScrapeError::InvalidPrice`] — a price field does not normalize.
    pub fn product_data(&self) -> Result<ShoeRecord, ScrapeError> {
        let missing = |field: &'static str| ScrapeError::MissingField {
            brand: Brand::Adidas,
            field,
        };

        let AdidasRawProduct::Api(info) = &self.product else {
            return Err(missing("id"));
        };

        let article = info
            .id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| missing("id"))?;

        let name = info
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| missing("name"))?;

        let url = info
            .meta_data
            .as_ref()
            .and_then(|m| m.canonical.as_deref())
            .map(absolutize)
            .ok_or_else(|| missing("meta_data.canonical"))?;

        let image = info
            .view_list
            .iter()
            .find_map(|v| v.image_url.clone())
            .ok_or_else(|| missing("view_list[0].image_url"))?;

        let pricing = info
            .pricing_information
            .as_ref()
            .ok_or_else(|| missing("pricing_information"))?;

        let price = pricing
            .standard_price
            .as_ref()
            .ok_or_else(|| missing("pricing_information.standard_price"))
            .and_then(|p| parse_price(&p.as_text()))?;

        let sale_price = pricing
            .sale_price
            .as_ref()
            .map(|p| parse_price(&p.as_text()))
            .transpose()?;

        let description = info
            .product_description
            .as_ref()
            .and_then(|d| d.text.clone())
            .unwrap_or_default();

        Ok(ShoeRecord {
            article: article.to_owned(),
            name: name.to_owned(),
            url,
            image,
            price,
            sale_price,
            sizes: self.in_stock_sizes(),
            description,
            source_brand: Brand::Adidas,
        })
    }

    /// Men's sizes whose stock status is `IN_STOCK`, normalized, deduplicated
    /// and sorted. The rendered-fallback payload carries no structured
    /// variations, so it yields an empty list.
    fn in_stock_sizes(&self) -> Vec<String> {
        let AdidasRawAvailability::Api(availability) = &self.availability else {
            return Vec::new();
        };

        let sizes = availability
            .variation_list
            .iter()
            .filter(|v| v.availability_status.as_deref() == Some(IN_STOCK))
            .filter_map(|v| v.size.as_deref())
            .filter(|size| size.contains('M'))
            .filter_map(normalize_size)
            .collect();

        sort_sizes(sizes)
    }
}

/// Resolves a host-relative canonical URL against the storefront origin.
fn absolutize(url: &str) -> String {
    if url.starts_with('/') {
        format!("{ADIDAS_ORIGIN}{url}")
    } else {
        url.to_owned()
    }
}
