//! The canonical product record every brand parser converges on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Brand;

/// A normalized sneaker listing, ready for storage and price comparison.
///
/// Produced only by a successful parse; the orchestrator upserts it keyed by
/// `article`. Prices are fixed-point decimals so threshold comparisons
/// downstream never hit float rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeRecord {
    /// Site-assigned SKU, e.g. `"DX1234"`. Non-empty; the upsert key.
    pub article: String,
    pub name: String,
    /// Absolute URL of the product page.
    pub url: String,
    /// Absolute URL of the primary product image.
    pub image: String,
    pub price: Decimal,
    /// Stored exactly as the site reported it; no relationship to `price`
    /// is enforced. Comparison consumers go through [`ShoeRecord::effective_price`].
    pub sale_price: Option<Decimal>,
    /// Normalized size tokens, deduplicated, in ascending numeric order.
    pub sizes: Vec<String>,
    /// May be empty; not every retailer exposes one.
    pub description: String,
    /// Which brand scraper produced this record.
    pub source_brand: Brand,
}

impl ShoeRecord {
    /// The price a threshold comparison should use: the sale price when one
    /// exists and is actually lower, otherwise the standard price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.sale_price {
            Some(sale) if sale < self.price => sale,
            _ => self.price,
        }
    }

    /// `true` when a sale price exists and undercuts the standard price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price.is_some_and(|sale| sale < self.price)
    }
}
