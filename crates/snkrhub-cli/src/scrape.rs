//! The `scrape` command: batch scraping over the pipeline.
//!
//! Articles fan out as concurrent tasks, bounded by
//! `max_concurrent_articles`; within one article, brands stay strictly
//! sequential inside the pipeline.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use snkrhub_core::AppConfig;
use snkrhub_db::{PgStore, PoolConfig};
use snkrhub_scraper::ScrapePipeline;

pub async fn run(
    config: &AppConfig,
    articles: Vec<String>,
    brands: Vec<String>,
) -> anyhow::Result<()> {
    let pool = snkrhub_db::connect_pool(&config.database_url, PoolConfig::from_app_config(config))
        .await?;
    snkrhub_db::run_migrations(&pool).await?;

    let store = Arc::new(PgStore::new(pool));
    let pipeline = Arc::new(ScrapePipeline::new(store, &config.browser_endpoint));

    let article_count = articles.len();
    let outcomes = stream::iter(articles)
        .map(|article| {
            let pipeline = Arc::clone(&pipeline);
            let brands = brands.clone();
            async move {
                let result = pipeline.scrape(&article, &brands).await;
                (article, result)
            }
        })
        .buffer_unordered(config.max_concurrent_articles.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut failed = 0usize;
    for (article, result) in outcomes {
        match result {
            Ok(record) => {
                let sale_note = if record.is_on_sale() { " (on sale)" } else { "" };
                println!(
                    "{article}: {} — {}{} ({} sizes) via {}",
                    record.name,
                    record.effective_price(),
                    sale_note,
                    record.sizes.len(),
                    record.source_brand
                );
            }
            Err(e) => {
                failed += 1;
                tracing::error!(article = %article, error = %e, "scrape failed");
                println!("{article}: FAILED — {e}");
            }
        }
    }

    if failed == article_count && article_count > 0 {
        anyhow::bail!("all {article_count} scrape requests failed");
    }
    Ok(())
}
