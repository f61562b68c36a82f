//! [`ProductStore`] implementation over the Postgres pool.

use async_trait::async_trait;
use sqlx::PgPool;

use snkrhub_core::{ProductStore, ShoeRecord, StoreError, UpsertOutcome};

/// The persistence gateway handed to the scrape pipeline.
///
/// Besides the upsert itself, every write appends a price-history
/// observation, so each successful scrape extends the price curve.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn upsert(&self, record: &ShoeRecord) -> Result<UpsertOutcome, StoreError> {
        let (row, was_created) = crate::upsert_shoe(&self.pool, record)
            .await
            .map_err(|e| StoreError::new(e.to_string()))?;

        if let Err(e) =
            crate::record_price_snapshot(&self.pool, row.id, row.price, row.sale_price).await
        {
            // History is an append-only side channel; the upsert stands.
            tracing::warn!(article = %row.article, error = %e, "failed to append price history");
        }

        Ok(UpsertOutcome {
            shoe_id: row.id,
            was_created,
        })
    }
}
