//! Narrow outbound interfaces: the persistence gateway the orchestrator
//! writes through, and the sink price-drop notifications go to.
//!
//! Both are traits so the pipeline can be exercised end-to-end against
//! in-memory fakes; the real implementations live in `snkrhub-db` and the
//! CLI respectively.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ShoeRecord;

/// Failure inside a store implementation, flattened to a message at this
/// boundary so core stays independent of any database crate.
#[derive(Debug, Error)]
#[error("store error: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of an upsert: the storage id and whether a new row was created
/// (`false` means an existing row for the same article was updated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub shoe_id: i64,
    pub was_created: bool,
}

/// Upsert-by-article storage of canonical records.
///
/// Implementations must be safe to share across concurrent scrape requests.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Updates the row whose `article` matches `record.article`, or inserts
    /// a new one. The pipeline never deletes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be written.
    async fn upsert(&self, record: &ShoeRecord) -> Result<UpsertOutcome, StoreError>;
}

#[async_trait]
impl<T: ProductStore + ?Sized> ProductStore for std::sync::Arc<T> {
    async fn upsert(&self, record: &ShoeRecord) -> Result<UpsertOutcome, StoreError> {
        (**self).upsert(record).await
    }
}

/// A price-drop event handed to the notification channel.
///
/// Prices cross this boundary as [`Decimal`] so the delivery layer can render
/// them without re-parsing float output.
#[derive(Debug, Clone)]
pub struct PriceDropAlert {
    /// Opaque recipient handle (for the reference deployment, a chat id).
    pub recipient: String,
    pub article: String,
    pub name: String,
    pub url: String,
    pub current_price: Decimal,
    pub desired_price: Decimal,
}

/// Delivery channel for price-drop events. The channel internals are out of
/// scope here; the shipped implementation just logs.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError`] if the alert cannot be delivered.
    async fn notify(&self, alert: &PriceDropAlert) -> Result<(), StoreError>;
}
