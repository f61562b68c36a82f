use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables already in the
/// process. `.env` loading is the binary's concern, before this is called.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The core parsing/validation logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let browser_endpoint = or_default("SNKRHUB_BROWSER_ENDPOINT", "localhost:9222");
    if browser_endpoint.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SNKRHUB_BROWSER_ENDPOINT".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(AppConfig {
        database_url: require("DATABASE_URL")?,
        log_level: or_default("SNKRHUB_LOG_LEVEL", "info"),
        browser_endpoint,
        db_max_connections: parse_u32("SNKRHUB_DB_MAX_CONNECTIONS", "10")?,
        db_min_connections: parse_u32("SNKRHUB_DB_MIN_CONNECTIONS", "1")?,
        db_acquire_timeout_secs: parse_u64("SNKRHUB_DB_ACQUIRE_TIMEOUT_SECS", "10")?,
        max_concurrent_articles: parse_usize("SNKRHUB_MAX_CONCURRENT_ARTICLES", "4")?,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
