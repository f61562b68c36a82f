//! Database operations for the `shoe_alerts` table: per-user price
//! thresholds and the query that finds which ones have triggered.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `shoe_alerts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AlertRow {
    pub id: i64,
    /// Opaque recipient handle for the delivery channel (a chat id in the
    /// reference deployment).
    pub chat_id: String,
    pub shoe_id: i64,
    pub desired_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// An alert joined with the current state of its shoe, for rows at or below
/// the desired threshold.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TriggeredAlertRow {
    pub chat_id: String,
    pub desired_price: Decimal,
    pub article: String,
    pub name: String,
    pub url: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
}

/// Registers (or re-prices) an alert for `(chat_id, article)`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the article is not tracked yet,
/// [`DbError::Sqlx`] on query failure.
pub async fn add_alert(
    pool: &PgPool,
    chat_id: &str,
    article: &str,
    desired_price: Decimal,
) -> Result<AlertRow, DbError> {
    let shoe = crate::get_shoe_by_article(pool, article).await?;

    let row = sqlx::query_as::<_, AlertRow>(
        "INSERT INTO shoe_alerts (chat_id, shoe_id, desired_price) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (chat_id, shoe_id) DO UPDATE SET desired_price = EXCLUDED.desired_price \
         RETURNING id, chat_id, shoe_id, desired_price, created_at",
    )
    .bind(chat_id)
    .bind(shoe.id)
    .bind(desired_price)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Alerts whose shoe is currently at or below the desired price.
///
/// The sale price is checked first, then the standard price; a shoe
/// triggers when either is at or below the threshold.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_triggered_alerts(pool: &PgPool) -> Result<Vec<TriggeredAlertRow>, DbError> {
    let rows = sqlx::query_as::<_, TriggeredAlertRow>(
        "SELECT a.chat_id, a.desired_price, s.article, s.name, s.url, s.price, s.sale_price \
         FROM shoe_alerts a \
         JOIN shoes s ON s.id = a.shoe_id \
         WHERE (s.sale_price IS NOT NULL AND s.sale_price <= a.desired_price) \
            OR s.price <= a.desired_price \
         ORDER BY a.chat_id, s.article",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
