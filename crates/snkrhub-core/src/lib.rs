pub mod app_config;
mod brands;
mod config;
pub mod products;
pub mod store;

use thiserror::Error;

pub use app_config::AppConfig;
pub use brands::Brand;
pub use config::load_app_config_from_env;
pub use products::ShoeRecord;
pub use store::{NotificationSink, PriceDropAlert, ProductStore, StoreError, UpsertOutcome};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
