//! The closed set of retail sites the pipeline knows how to scrape.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A retailer with a dedicated scraper/parser pair.
///
/// The tag form (`"Adidas"`, `"Nike"`) is what callers pass to select a
/// source and what gets persisted in the `parsed_from` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    Adidas,
    Nike,
}

impl Brand {
    pub const ALL: [Brand; 2] = [Brand::Adidas, Brand::Nike];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Brand::Adidas => "Adidas",
            Brand::Nike => "Nike",
        }
    }

    /// `true` for retailers with a JSON product API; `false` for retailers
    /// that require a rendered page. API-based brands are cheaper to try, so
    /// callers usually order them first.
    #[must_use]
    pub fn is_api_based(self) -> bool {
        match self {
            Brand::Adidas => true,
            Brand::Nike => false,
        }
    }

    /// Resolves a caller-supplied brand tag, case-insensitively.
    /// Returns `None` for unknown tags; the orchestrator drops those.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Brand> {
        Brand::ALL
            .into_iter()
            .find(|b| b.tag().eq_ignore_ascii_case(tag.trim()))
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Brand {
    type Err = crate::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Brand::from_tag(s).ok_or_else(|| crate::ConfigError::InvalidEnvVar {
            var: "brand".to_string(),
            reason: format!("unknown brand tag \"{s}\""),
        })
    }
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
