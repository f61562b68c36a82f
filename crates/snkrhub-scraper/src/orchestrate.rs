//! Scraping orchestration: fallback ordering across brands, error
//! aggregation, identity checking, and idempotent persistence.
//!
//! Brands for one article are tried strictly sequentially — the render-based
//! sources draw on a limited pool of browser sessions, and an early success
//! short-circuits the remaining (slower) brands. Independent articles may be
//! scraped concurrently; each pipeline call owns its fetch clients
//! end-to-end.

use std::sync::Arc;

use snkrhub_core::{Brand, ProductStore, ShoeRecord, StoreError};
use thiserror::Error;

use crate::sources::{LiveSources, SourceFactory};

/// Why one brand's attempt failed.
#[derive(Debug)]
pub struct BrandFailure {
    pub brand: Brand,
    pub reason: String,
}

/// A brand that returned a well-formed record for the wrong article.
#[derive(Debug)]
pub struct BrandMismatch {
    pub brand: Brand,
    pub returned_article: String,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The request named no known brand; nothing was attempted.
    #[error("no valid brand in request")]
    NoValidBrand,

    /// Every brand that produced a record produced one for a different
    /// article.
    #[error("article {requested} not found; sources returned [{}]", format_mismatches(.found))]
    ArticleNotFound {
        requested: String,
        found: Vec<BrandMismatch>,
    },

    /// Every brand failed outright.
    #[error("all sources failed for {article}: [{}]", format_failures(.failures))]
    AllSourcesFailed {
        article: String,
        failures: Vec<BrandFailure>,
    },

    /// The record parsed but could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn format_failures(failures: &[BrandFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.brand, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_mismatches(found: &[BrandMismatch]) -> String {
    found
        .iter()
        .map(|m| format!("{}: {}", m.brand, m.returned_article))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The single entry point the surrounding application calls.
///
/// Owns the fallback policy: brands are attempted in caller order until one
/// yields a record whose article matches the request, and that record is
/// upserted before the pipeline returns it.
pub struct ScrapePipeline<S> {
    store: S,
    sources: Arc<dyn SourceFactory>,
}

impl<S: ProductStore> ScrapePipeline<S> {
    /// Production pipeline over the live brand sources.
    pub fn new(store: S, browser_endpoint: &str) -> Self {
        Self::with_sources(store, Arc::new(LiveSources::new(browser_endpoint)))
    }

    /// Pipeline over a caller-supplied source factory.
    pub fn with_sources(store: S, sources: Arc<dyn SourceFactory>) -> Self {
        Self { store, sources }
    }

    /// Scrapes `article`, trying `brand_tags` in order, and upserts the
    /// winning record.
    ///
    /// Unknown tags are dropped with a warning. Any error from a brand's
    /// scraper or parser is that brand's failure, never the request's; a
    /// record naming a different article is treated as not-found at that
    /// brand. The caller always receives one well-formed record or a
    /// terminal error carrying every attempted brand's outcome.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::NoValidBrand`] — no known brand in the request.
    /// - [`PipelineError::ArticleNotFound`] — records found, none matching.
    /// - [`PipelineError::AllSourcesFailed`] — every brand errored.
    /// - [`PipelineError::Store`] — the winning record could not be
    ///   persisted.
    pub async fn scrape(
        &self,
        article: &str,
        brand_tags: &[String],
    ) -> Result<ShoeRecord, PipelineError> {
        let brands = known_brands(brand_tags);
        if brands.is_empty() {
            return Err(PipelineError::NoValidBrand);
        }

        let mut failures: Vec<BrandFailure> = Vec::new();
        let mut mismatches: Vec<BrandMismatch> = Vec::new();

        for brand in brands {
            tracing::debug!(
                brand = %brand,
                article = %article,
                api_based = brand.is_api_based(),
                "attempting brand"
            );
            let source = self.sources.create(brand);
            match source.fetch_product(article).await {
                Ok(record) => {
                    if !article_matches(&record.article, article) {
                        tracing::warn!(
                            brand = %brand,
                            requested = %article,
                            returned = %record.article,
                            "source returned a different article; treating as not found"
                        );
                        mismatches.push(BrandMismatch {
                            brand,
                            returned_article: record.article,
                        });
                        continue;
                    }

                    let outcome = self.store.upsert(&record).await?;
                    tracing::info!(
                        brand = %brand,
                        article = %record.article,
                        was_created = outcome.was_created,
                        "scraped record persisted"
                    );
                    return Ok(record);
                }
                Err(e) => {
                    tracing::warn!(brand = %brand, article = %article, error = %e, "brand attempt failed");
                    failures.push(BrandFailure {
                        brand,
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Mismatch evidence wins over hard failures: some source did find a
        // record, just not the requested one.
        if mismatches.is_empty() {
            Err(PipelineError::AllSourcesFailed {
                article: article.to_owned(),
                failures,
            })
        } else {
            Err(PipelineError::ArticleNotFound {
                requested: article.to_owned(),
                found: mismatches,
            })
        }
    }
}

/// Resolves caller-supplied tags to known brands, preserving order and
/// dropping duplicates. Unknown tags are logged and skipped.
fn known_brands(brand_tags: &[String]) -> Vec<Brand> {
    let mut brands = Vec::new();
    for tag in brand_tags {
        match Brand::from_tag(tag) {
            Some(brand) if !brands.contains(&brand) => brands.push(brand),
            Some(_) => {}
            None => tracing::warn!(tag = %tag, "dropping unknown brand tag"),
        }
    }
    brands
}

fn article_matches(returned: &str, requested: &str) -> bool {
    returned.trim().eq_ignore_ascii_case(requested.trim())
}

#[cfg(test)]
#[path = "orchestrate_test.rs"]
mod tests;
