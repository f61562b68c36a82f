//! Normalization from the Nike raw field set to the canonical record.

use snkrhub_core::{Brand, ShoeRecord};

use crate::error::ScrapeError;
use crate::normalize::{normalize_size, parse_price, sort_sizes};

use super::extract::NikeRawProduct;

/// Builds the canonical record from an extracted field set. Nike markup does
/// not carry the SKU, so the requested article id becomes the record's
/// article; the site exposes no structured sale price either.
pub struct NikeParser {
    raw: NikeRawProduct,
    article: String,
}

impl NikeParser {
    #[must_use]
    pub fn new(raw: NikeRawProduct, article: &str) -> Self {
        Self {
            raw,
            article: article.to_owned(),
        }
    }

    /// # Errors
    ///
    /// - [`ScrapeError::MissingField`] — the extracted name or image URL is
    ///   empty (present-but-blank attributes).
    /// - [`ScrapeError::InvalidPrice`] — the rendered price text does not
    ///   normalize.
    pub fn product_data(self) -> Result<ShoeRecord, ScrapeError> {
        let missing = |field: &'static str| ScrapeError::MissingField {
            brand: Brand::Nike,
            field,
        };

        if self.raw.name.trim().is_empty() {
            return Err(missing("name"));
        }
        if self.raw.image.trim().is_empty() {
            return Err(missing("image"));
        }

        let price = parse_price(&self.raw.price_text)?;

        let sizes = sort_sizes(
            self.raw
                .sizes
                .iter()
                .filter(|entry| !entry.disabled)
                .filter_map(|entry| normalize_size(&entry.label))
                .collect(),
        );

        Ok(ShoeRecord {
            article: self.article,
            name: self.raw.name,
            url: self.raw.product_url,
            image: self.raw.image,
            price,
            sale_price: None,
            sizes,
            description: self.raw.description.unwrap_or_default(),
            source_brand: Brand::Nike,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::extract::NikeSizeEntry;
    use super::*;

    fn raw() -> NikeRawProduct {
        NikeRawProduct {
            product_url: "https://www.nike.com/t/air-max-90/DX1234".to_string(),
            name: "Air Max 90".to_string(),
            image: "https://static.nike.com/air-max-90.png".to_string(),
            price_text: "$129.99".to_string(),
            description: Some("The original look.".to_string()),
            sizes: vec![
                NikeSizeEntry {
                    label: "9 M".to_string(),
                    disabled: false,
                },
                NikeSizeEntry {
                    label: "9.5 M".to_string(),
                    disabled: false,
                },
                NikeSizeEntry {
                    label: "10 M".to_string(),
                    disabled: true,
                },
                NikeSizeEntry {
                    label: "OS".to_string(),
                    disabled: false,
                },
            ],
        }
    }

    #[test]
    fn parses_full_record() {
        let record = NikeParser::new(raw(), "DX1234").product_data().unwrap();
        assert_eq!(record.article, "DX1234");
        assert_eq!(record.name, "Air Max 90");
        assert_eq!(record.price, parse_price("129.99").unwrap());
        assert_eq!(record.sale_price, None);
        assert_eq!(record.source_brand, Brand::Nike);
        assert_eq!(record.description, "The original look.");
    }

    #[test]
    fn disabled_and_non_numeric_sizes_are_dropped() {
        let record = NikeParser::new(raw(), "DX1234").product_data().unwrap();
        assert_eq!(record.sizes, vec!["9", "9.5"]);
    }

    #[test]
    fn blank_name_is_missing_field() {
        let mut r = raw();
        r.name = "  ".to_string();
        let err = NikeParser::new(r, "DX1234").product_data().unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingField {
                brand: Brand::Nike,
                field: "name"
            }
        ));
    }

    #[test]
    fn unparseable_price_fails() {
        let mut r = raw();
        r.price_text = "Sold Out".to_string();
        let err = NikeParser::new(r, "DX1234").product_data().unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidPrice { .. }));
    }

    #[test]
    fn missing_description_becomes_empty() {
        let mut r = raw();
        r.description = None;
        let record = NikeParser::new(r, "DX1234").product_data().unwrap();
        assert_eq!(record.description, "");
    }
}
