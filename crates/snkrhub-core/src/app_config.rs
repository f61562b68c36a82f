//! Application configuration.
//!
//! Everything comes from environment variables; see [`crate::load_app_config`].
//! Scraper network timeouts and user-agent strings are implementation
//! constants in `snkrhub-scraper`, not runtime config.

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_level: String,
    /// `host:port` of the remote headless-browser session the rendering
    /// fetch strategy connects to.
    pub browser_endpoint: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Upper bound on independent article requests scraped concurrently by
    /// the CLI batch path. Brands within one article are always sequential.
    pub max_concurrent_articles: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("browser_endpoint", &self.browser_endpoint)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("max_concurrent_articles", &self.max_concurrent_articles)
            .finish()
    }
}
