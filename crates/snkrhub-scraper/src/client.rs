//! Direct HTTP/JSON fetch strategy — the fast path for retailers that
//! expose a product API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ScrapeError;

const REQUEST_TIMEOUT_SECS: u64 = 20;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Chrome profile sent on every API request. Retail product APIs reject
/// default library user agents, so the client impersonates a browser.
pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Cap on how much of an error response body is carried in the error value.
const MAX_ERROR_BODY_BYTES: usize = 256;

/// JSON API client with browser-impersonating headers.
///
/// One instance per scrape request; no connection state is shared across
/// concurrent requests.
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ScrapeError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Issues a GET and deserializes the JSON body.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Network`] — transport-level failure (DNS, TLS,
    ///   connection refused, timeout).
    /// - [`ScrapeError::UpstreamStatus`] — any non-2xx status, carrying the
    ///   status code and the start of the body.
    /// - [`ScrapeError::InvalidJson`] — 2xx response whose body is not valid
    ///   JSON for `T`.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ScrapeError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "application/json, text/plain, */*",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, origin_of(url))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ScrapeError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_owned(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| ScrapeError::InvalidJson {
            url: url.to_owned(),
            source: e,
        })
    }
}

/// Derives the `scheme://host/` origin of a URL for the `Referer` header.
/// Falls back to the input when it has no scheme separator.
fn origin_of(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_owned();
    };
    let host_start = scheme_end + 3;
    let host_end = url[host_start..]
        .find('/')
        .map_or(url.len(), |i| host_start + i);
    format!("{}/", &url[..host_end])
}

fn truncate_body(body: &str) -> String {
    let mut end = MAX_ERROR_BODY_BYTES.min(body.len());
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_owned()
}
