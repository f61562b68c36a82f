//! Database operations for the `price_history` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `price_history` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PriceHistoryRow {
    pub id: i64,
    pub shoe_id: i64,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub recorded_at: DateTime<Utc>,
}

/// Appends one price observation for a shoe.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn record_price_snapshot(
    pool: &PgPool,
    shoe_id: i64,
    price: Decimal,
    sale_price: Option<Decimal>,
) -> Result<(), DbError> {
    sqlx::query("INSERT INTO price_history (shoe_id, price, sale_price) VALUES ($1, $2, $3)")
        .bind(shoe_id)
        .bind(price)
        .bind(sale_price)
        .execute(pool)
        .await?;
    Ok(())
}

/// Appends a price observation for every tracked shoe in one statement.
/// Run by the daily snapshot job; returns the number of rows written.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn snapshot_all_prices(pool: &PgPool) -> Result<u64, DbError> {
    let result =
        sqlx::query("INSERT INTO price_history (shoe_id, price, sale_price) \
                     SELECT id, price, sale_price FROM shoes")
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}

/// Price observations for an article, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn price_history_for_article(
    pool: &PgPool,
    article: &str,
) -> Result<Vec<PriceHistoryRow>, DbError> {
    let rows = sqlx::query_as::<_, PriceHistoryRow>(
        "SELECT ph.id, ph.shoe_id, ph.price, ph.sale_price, ph.recorded_at \
         FROM price_history ph \
         JOIN shoes s ON s.id = ph.shoe_id \
         WHERE s.article = $1 \
         ORDER BY ph.recorded_at DESC",
    )
    .bind(article)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
