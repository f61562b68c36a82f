use snkrhub_core::Brand;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UpstreamStatus {
        status: u16,
        url: String,
        /// First bytes of the response body, for diagnostics.
        body: String,
    },

    #[error("invalid JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("browser rendering failed for {url}: {reason}")]
    Render { url: String, reason: String },

    #[error("{brand}: expected markup not found: {selector}")]
    Extraction {
        brand: Brand,
        selector: &'static str,
    },

    #[error("{brand}: missing expected field: {field}")]
    MissingField { brand: Brand, field: &'static str },

    #[error("invalid price format: {raw:?}")]
    InvalidPrice { raw: String },
}
