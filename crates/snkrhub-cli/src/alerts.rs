//! Alert management and price-drop checking.

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use snkrhub_core::{AppConfig, NotificationSink, PriceDropAlert, StoreError};
use snkrhub_db::PoolConfig;

/// Notification sink that logs each alert. The real delivery channel (a
/// chat bot) lives outside this binary and consumes the same
/// [`NotificationSink`] seam.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn notify(&self, alert: &PriceDropAlert) -> Result<(), StoreError> {
        tracing::info!(
            recipient = %alert.recipient,
            article = %alert.article,
            price = %alert.current_price,
            desired = %alert.desired_price,
            "price drop"
        );
        println!(
            "notify {}: {} ({}) is at {} — desired {} — {}",
            alert.recipient,
            alert.name,
            alert.article,
            alert.current_price,
            alert.desired_price,
            alert.url
        );
        Ok(())
    }
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = snkrhub_db::connect_pool(&config.database_url, PoolConfig::from_app_config(config))
        .await?;
    snkrhub_db::run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn add(
    config: &AppConfig,
    article: &str,
    chat_id: &str,
    desired_price: &str,
) -> anyhow::Result<()> {
    let desired = Decimal::from_str(desired_price)
        .map_err(|e| anyhow::anyhow!("invalid desired price {desired_price:?}: {e}"))?;

    let pool = connect(config).await?;
    let alert = snkrhub_db::add_alert(&pool, chat_id, article, desired).await?;
    println!(
        "alert registered: {} will be notified when {} drops to {}",
        alert.chat_id, article, alert.desired_price
    );
    Ok(())
}

/// Runs one pass over the registered alerts and pushes every triggered one
/// into the sink.
pub async fn check_prices(config: &AppConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    let count = run_price_check(&pool, &LogSink).await?;
    println!("{count} alert(s) triggered");
    Ok(())
}

/// Shared by the one-shot command and the recurring watch job.
pub async fn run_price_check(
    pool: &PgPool,
    sink: &dyn NotificationSink,
) -> anyhow::Result<usize> {
    let triggered = snkrhub_db::list_triggered_alerts(pool).await?;

    for row in &triggered {
        let current_price = match row.sale_price {
            Some(sale) if sale <= row.desired_price => sale,
            _ => row.price,
        };
        let alert = PriceDropAlert {
            recipient: row.chat_id.clone(),
            article: row.article.clone(),
            name: row.name.clone(),
            url: row.url.clone(),
            current_price,
            desired_price: row.desired_price,
        };
        if let Err(e) = sink.notify(&alert).await {
            tracing::warn!(recipient = %row.chat_id, article = %row.article, error = %e, "notification failed");
        }
    }

    Ok(triggered.len())
}

pub async fn list(config: &AppConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    let rows = snkrhub_db::list_shoes(&pool).await?;

    if rows.is_empty() {
        println!("no shoes tracked yet");
        return Ok(());
    }
    for row in rows {
        match row.sale_price {
            Some(sale) => println!(
                "{}  {}  {} (sale {})  via {}",
                row.article, row.name, row.price, sale, row.parsed_from
            ),
            None => println!(
                "{}  {}  {}  via {}",
                row.article, row.name, row.price, row.parsed_from
            ),
        }
    }
    Ok(())
}

pub async fn history(config: &AppConfig, article: &str) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    let rows = snkrhub_db::price_history_for_article(&pool, article).await?;

    if rows.is_empty() {
        println!("no price history recorded for {article}");
        return Ok(());
    }
    for row in rows {
        match row.sale_price {
            Some(sale) => println!("{}  {}  (sale {})", row.recorded_at, row.price, sale),
            None => println!("{}  {}", row.recorded_at, row.price),
        }
    }
    Ok(())
}
