//! Raw payload types for the Adidas product API.
//!
//! Every field the parser reads is optional here; the parser decides which
//! are required and fails with a named missing-field error rather than
//! defaulting. The availability endpoint reports per-size stock status as
//! `"IN_STOCK"` / `"OUT_OF_STOCK"` strings.

use serde::Deserialize;

/// Response from `GET /api/products/{article}`.
#[derive(Debug, Deserialize)]
pub struct AdidasProductInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub meta_data: Option<AdidasMetaData>,
    #[serde(default)]
    pub pricing_information: Option<AdidasPricing>,
    #[serde(default)]
    pub product_description: Option<AdidasDescription>,
    /// Image gallery; the first entry's URL becomes the record image.
    #[serde(default)]
    pub view_list: Vec<AdidasView>,
}

#[derive(Debug, Deserialize)]
pub struct AdidasMetaData {
    /// Canonical product-page URL, sometimes host-relative.
    #[serde(default)]
    pub canonical: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdidasPricing {
    #[serde(default)]
    pub standard_price: Option<RawPrice>,
    #[serde(default)]
    pub sale_price: Option<RawPrice>,
}

#[derive(Debug, Deserialize)]
pub struct AdidasDescription {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdidasView {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Response from `GET /api/products/{article}/availability`.
#[derive(Debug, Deserialize)]
pub struct AdidasAvailability {
    #[serde(default)]
    pub variation_list: Vec<AdidasVariation>,
}

#[derive(Debug, Deserialize)]
pub struct AdidasVariation {
    /// Size label as the site renders it, e.g. `"9.5 M / 11 W"`.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub availability_status: Option<String>,
}

/// A price exactly as the API reports it; the endpoint has shipped both
/// string and bare-number forms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Text(String),
    Number(f64),
}

impl RawPrice {
    /// The raw text handed to price normalization.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            RawPrice::Text(s) => s.clone(),
            RawPrice::Number(n) => n.to_string(),
        }
    }
}

/// Raw product payload: the structured API response on the fast path, or
/// best-effort page text captured by the rendering fallback.
#[derive(Debug)]
pub enum AdidasRawProduct {
    Api(AdidasProductInfo),
    PageText(String),
}

/// Raw availability payload, same two shapes as [`AdidasRawProduct`].
#[derive(Debug)]
pub enum AdidasRawAvailability {
    Api(AdidasAvailability),
    PageText(String),
}
