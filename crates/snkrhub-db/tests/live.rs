//! Live integration tests for snkrhub-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/snkrhub-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use std::str::FromStr;

use rust_decimal::Decimal;
use snkrhub_core::{Brand, ProductStore, ShoeRecord};
use snkrhub_db::{
    add_alert, get_shoe_by_article, list_triggered_alerts, price_history_for_article,
    snapshot_all_prices, upsert_shoe, PgStore,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn record(article: &str, price: &str, sale_price: Option<&str>) -> ShoeRecord {
    ShoeRecord {
        article: article.to_string(),
        name: "Samba OG".to_string(),
        url: "https://www.adidas.com/us/samba-og-shoes/DX1234.html".to_string(),
        image: "https://assets.adidas.com/images/DX1234.jpg".to_string(),
        price: dec(price),
        sale_price: sale_price.map(dec),
        sizes: vec!["9".to_string(), "9.5".to_string()],
        description: "A classic.".to_string(),
        source_brand: Brand::Adidas,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_inserts_then_updates_in_place(pool: sqlx::PgPool) {
    let (row, was_created) = upsert_shoe(&pool, &record("DX1234", "129.99", None))
        .await
        .unwrap();
    assert!(was_created);
    assert_eq!(row.article, "DX1234");
    assert_eq!(row.price, dec("129.99"));

    let (row2, was_created2) = upsert_shoe(&pool, &record("DX1234", "119.99", Some("99.99")))
        .await
        .unwrap();
    assert!(!was_created2);
    assert_eq!(row2.id, row.id);
    assert_eq!(row2.price, dec("119.99"));
    assert_eq!(row2.sale_price, Some(dec("99.99")));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shoes WHERE article = $1")
        .bind("DX1234")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn store_upsert_appends_price_history(pool: sqlx::PgPool) {
    let store = PgStore::new(pool.clone());

    store.upsert(&record("DX1234", "129.99", None)).await.unwrap();
    store
        .upsert(&record("DX1234", "119.99", Some("99.99")))
        .await
        .unwrap();

    let history = price_history_for_article(&pool, "DX1234").await.unwrap();
    assert_eq!(history.len(), 2);
    // Newest first.
    assert_eq!(history[0].price, dec("119.99"));
    assert_eq!(history[0].sale_price, Some(dec("99.99")));
    assert_eq!(history[1].price, dec("129.99"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn snapshot_all_prices_covers_every_shoe(pool: sqlx::PgPool) {
    upsert_shoe(&pool, &record("DX1234", "129.99", None))
        .await
        .unwrap();
    upsert_shoe(&pool, &record("FZ5678", "180.00", None))
        .await
        .unwrap();

    let written = snapshot_all_prices(&pool).await.unwrap();
    assert_eq!(written, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn triggered_alerts_prefer_sale_price_then_price(pool: sqlx::PgPool) {
    // At threshold via sale price.
    upsert_shoe(&pool, &record("DX1234", "129.99", Some("89.99")))
        .await
        .unwrap();
    // At threshold via standard price.
    upsert_shoe(&pool, &record("FZ5678", "95.00", None))
        .await
        .unwrap();
    // Above threshold.
    upsert_shoe(&pool, &record("HQ9999", "200.00", None))
        .await
        .unwrap();

    add_alert(&pool, "chat-17", "DX1234", dec("100.00")).await.unwrap();
    add_alert(&pool, "chat-17", "FZ5678", dec("100.00")).await.unwrap();
    add_alert(&pool, "chat-17", "HQ9999", dec("100.00")).await.unwrap();

    let triggered = list_triggered_alerts(&pool).await.unwrap();
    let articles: Vec<&str> = triggered.iter().map(|t| t.article.as_str()).collect();
    assert_eq!(articles, vec!["DX1234", "FZ5678"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_shoe_by_article_round_trips_sizes(pool: sqlx::PgPool) {
    upsert_shoe(&pool, &record("DX1234", "129.99", None))
        .await
        .unwrap();
    let row = get_shoe_by_article(&pool, "DX1234").await.unwrap();
    assert_eq!(row.sizes, vec!["9", "9.5"]);
    assert_eq!(row.parsed_from, "Adidas");
}
