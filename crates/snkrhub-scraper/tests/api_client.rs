//! Integration tests for `ApiClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server per test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use snkrhub_scraper::{ApiClient, ScrapeError};

#[tokio::test]
async fn get_returns_parsed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/DX1234"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({"id": "DX1234", "name": "Samba"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new().unwrap();
    let value: serde_json::Value = client
        .get(&format!("{}/api/products/DX1234", server.uri()))
        .await
        .unwrap();

    assert_eq!(value["id"], "DX1234");
    assert_eq!(value["name"], "Samba");
}

#[tokio::test]
async fn get_sends_browser_impersonating_headers() {
    let server = MockServer::start().await;

    // The mock only matches when the impersonation headers are present, so a
    // bare library request would 404 out of the expectation.
    Mock::given(method("GET"))
        .and(path("/api/products/DX1234"))
        .and(header("accept", "application/json, text/plain, */*"))
        .and(header("accept-language", "en-US,en;q=0.9"))
        .and(header_exists("referer"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new().unwrap();
    let result: Result<serde_json::Value, _> = client
        .get(&format!("{}/api/products/DX1234", server.uri()))
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn non_200_is_upstream_status_with_body_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/GONE42"))
        .respond_with(ResponseTemplate::new(404).set_body_string("product not found"))
        .mount(&server)
        .await;

    let client = ApiClient::new().unwrap();
    let err = client
        .get::<serde_json::Value>(&format!("{}/api/products/GONE42", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            ScrapeError::UpstreamStatus { status: 404, ref body, .. } if body.contains("product not found")
        ),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn invalid_json_body_is_invalid_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/DX1234"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>bot check</html>"))
        .mount(&server)
        .await;

    let client = ApiClient::new().unwrap();
    let err = client
        .get::<serde_json::Value>(&format!("{}/api/products/DX1234", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScrapeError::InvalidJson { .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Nothing listens on this port.
    let client = ApiClient::new().unwrap();
    let err = client
        .get::<serde_json::Value>("http://127.0.0.1:9/api/products/DX1234")
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Network(_)), "got: {err:?}");
}
