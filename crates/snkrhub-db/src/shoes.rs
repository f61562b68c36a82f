//! Database operations for the `shoes` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use snkrhub_core::ShoeRecord;

use crate::DbError;

/// A row from the `shoes` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShoeRow {
    pub id: i64,
    pub article: String,
    pub name: String,
    pub url: String,
    pub image: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub sizes: Vec<String>,
    pub description: String,
    /// Brand tag of the scraper that produced the record, e.g. `"Adidas"`.
    pub parsed_from: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upserts a canonical record, keyed by `article`.
///
/// A conflict on `article` updates every scraped column in place and bumps
/// `updated_at`; rows are never deleted here.
///
/// Returns the stored row and whether it was newly created.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_shoe(pool: &PgPool, record: &ShoeRecord) -> Result<(ShoeRow, bool), DbError> {
    // xmax = 0 only holds for rows created by this statement, which is how
    // the insert-vs-update outcome is observed in one round trip.
    let (row, was_created): (ShoeRow, bool) = sqlx::query_as::<_, ShoeRowWithCreated>(
        "INSERT INTO shoes \
             (article, name, url, image, price, sale_price, sizes, description, parsed_from) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         ON CONFLICT (article) DO UPDATE SET \
             name        = EXCLUDED.name, \
             url         = EXCLUDED.url, \
             image       = EXCLUDED.image, \
             price       = EXCLUDED.price, \
             sale_price  = EXCLUDED.sale_price, \
             sizes       = EXCLUDED.sizes, \
             description = EXCLUDED.description, \
             parsed_from = EXCLUDED.parsed_from, \
             updated_at  = NOW() \
         RETURNING *, (xmax = 0) AS was_created",
    )
    .bind(&record.article)
    .bind(&record.name)
    .bind(&record.url)
    .bind(&record.image)
    .bind(record.price)
    .bind(record.sale_price)
    .bind(&record.sizes)
    .bind(&record.description)
    .bind(record.source_brand.tag())
    .fetch_one(pool)
    .await
    .map(ShoeRowWithCreated::into_parts)?;

    Ok((row, was_created))
}

/// Fetches a shoe by its article id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row matches, [`DbError::Sqlx`] on
/// query failure.
pub async fn get_shoe_by_article(pool: &PgPool, article: &str) -> Result<ShoeRow, DbError> {
    sqlx::query_as::<_, ShoeRow>(
        "SELECT id, article, name, url, image, price, sale_price, sizes, description, \
                parsed_from, created_at, updated_at \
         FROM shoes WHERE article = $1",
    )
    .bind(article)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Lists all tracked shoes, most recently updated first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_shoes(pool: &PgPool) -> Result<Vec<ShoeRow>, DbError> {
    let rows = sqlx::query_as::<_, ShoeRow>(
        "SELECT id, article, name, url, image, price, sale_price, sizes, description, \
                parsed_from, created_at, updated_at \
         FROM shoes ORDER BY updated_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Row wrapper carrying the `was_created` flag computed by the upsert.
#[derive(sqlx::FromRow)]
struct ShoeRowWithCreated {
    #[sqlx(flatten)]
    row: ShoeRow,
    was_created: bool,
}

impl ShoeRowWithCreated {
    fn into_parts(self) -> (ShoeRow, bool) {
        (self.row, self.was_created)
    }
}
