//! The `watch` command: recurring background jobs.
//!
//! Registers a daily price-history snapshot and an hourly price-drop check
//! on a [`JobScheduler`], then parks until Ctrl-C. Dropping the scheduler
//! handle shuts down all jobs.

use std::sync::Arc;

use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use snkrhub_core::AppConfig;
use snkrhub_db::PoolConfig;

use crate::alerts::{run_price_check, LogSink};

/// Daily at 06:00 UTC.
const SNAPSHOT_SCHEDULE: &str = "0 0 6 * * *";
/// Hourly, at minute 15.
const PRICE_CHECK_SCHEDULE: &str = "0 15 * * * *";

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let pool = snkrhub_db::connect_pool(&config.database_url, PoolConfig::from_app_config(config))
        .await?;
    snkrhub_db::run_migrations(&pool).await?;

    let mut scheduler = build_scheduler(pool).await?;

    tracing::info!("watch started; press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    tracing::info!("watch stopping");

    scheduler.shutdown().await?;
    Ok(())
}

/// Builds and starts the scheduler with both recurring jobs registered.
/// The returned handle must be kept alive for the lifetime of the process.
async fn build_scheduler(pool: PgPool) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_snapshot_job(&scheduler, pool.clone()).await?;
    register_price_check_job(&scheduler, pool).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Appends a price-history observation for every tracked shoe once a day, so
/// the price curve advances even for articles nobody re-scraped.
async fn register_snapshot_job(
    scheduler: &JobScheduler,
    pool: PgPool,
) -> Result<(), JobSchedulerError> {
    let pool = Arc::new(pool);

    let job = Job::new_async(SNAPSHOT_SCHEDULE, move |_uuid, _lock| {
        let pool = Arc::clone(&pool);
        Box::pin(async move {
            match snkrhub_db::snapshot_all_prices(&pool).await {
                Ok(written) => tracing::info!(rows = written, "daily price snapshot complete"),
                Err(e) => tracing::error!(error = %e, "daily price snapshot failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Compares every registered alert against current prices and pushes
/// triggered ones into the notification sink.
async fn register_price_check_job(
    scheduler: &JobScheduler,
    pool: PgPool,
) -> Result<(), JobSchedulerError> {
    let pool = Arc::new(pool);

    let job = Job::new_async(PRICE_CHECK_SCHEDULE, move |_uuid, _lock| {
        let pool = Arc::clone(&pool);
        Box::pin(async move {
            match run_price_check(&pool, &LogSink).await {
                Ok(triggered) => tracing::info!(triggered, "price check complete"),
                Err(e) => tracing::error!(error = %e, "price check failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
