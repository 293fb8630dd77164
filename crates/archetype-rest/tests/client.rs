//! Integration tests for the Archetype REST client
//!
//! Runs the client against a local `wiremock` server and checks what goes over
//! the wire as well as how responses are mapped.

mod common;

use archetype_rest::{ErrorKind, Method};
use common::*;
use rust_decimal_macros::dec;
use serde_json::json;
use std::time::Duration;

// =============================================================================
// Read Endpoints
// =============================================================================

#[tokio::test]
async fn test_get_strategy_archetypes() {
    let server = TestServer::start(200, STRATEGY_RESPONSE).await;
    let client = server.client();

    let result = client.get_strategy_archetypes("A052").await.unwrap();
    assert_eq!(result.archetype_ids, vec!["A052x".to_string()]);

    let request = server.captured().await;
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/internal/archetype/strategy/A052");
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_get_archetype() {
    let server = TestServer::start(200, ARCHETYPE_RESPONSE).await;
    let client = server.client();

    let archetype = client.get_archetype("A052071812-7a9581c6").await.unwrap();
    assert_eq!(archetype.allocation("HSX:TPB"), Some(dec!(0.35)));
    assert_eq!(archetype.allocation("HSX:FPT"), Some(dec!(0.4)));
    assert_eq!(archetype.total_allocation(), Some(dec!(1)));

    let request = server.captured().await;
    assert_eq!(request.target, "/internal/archetype/A052071812-7a9581c6");
}

#[tokio::test]
async fn test_unexpected_shape_is_transport_error() {
    let server = TestServer::start(200, r#"{"archetypes":[]}"#).await;
    let client = server.client();

    let err = client.get_strategy_archetypes("A052").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status_code(), 0);
    assert!(err.message().contains("malformed response"));
}

// =============================================================================
// Signing and Headers
// =============================================================================

#[tokio::test]
async fn test_auth_headers_sent() {
    let server = TestServer::start(200, STRATEGY_RESPONSE).await;
    let client = server.client();

    client.get_strategy_archetypes("A052").await.unwrap();
    let request = server.captured().await;

    let expected = credentials()
        .sign("GET", "/internal/archetype/strategy/A052", FIXED_TS, None)
        .unwrap();

    assert_eq!(request.header("x-api-key"), Some(API_KEY));
    assert_eq!(request.header("x-timestamp"), Some("1700000000"));
    assert_eq!(request.header("x-signature"), Some(expected.as_str()));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_secret_never_sent() {
    let server = TestServer::start(200, STRATEGY_RESPONSE).await;
    let client = server.client();

    client.get_strategy_archetypes("A052").await.unwrap();
    let request = server.captured().await;

    assert!(request
        .headers
        .iter()
        .all(|(_, value)| !value.contains(API_SECRET)));
}

#[tokio::test]
async fn test_body_is_canonical_and_signed() {
    let server = TestServer::start(200, r#"{"ok":true}"#).await;
    let client = server.client();

    let body = json!({"sid": "A052", "filters": {"min": 0.1, "exchange": "HSX"}});
    let response = client
        .request(Method::POST, "/internal/archetype/search", None, Some(&body))
        .await
        .unwrap();
    assert_eq!(response, json!({"ok": true}));

    let request = server.captured().await;
    let canonical = r#"{"filters": {"exchange": "HSX", "min": 0.1}, "sid": "A052"}"#;
    assert_eq!(request.method, "POST");
    assert_eq!(request.body, canonical);

    let expected = credentials().sign_message(&format!(
        "POST|/internal/archetype/search|1700000000|{}",
        canonical
    ));
    assert_eq!(request.header("x-signature"), Some(expected.as_str()));
}

#[tokio::test]
async fn test_query_not_signed() {
    let server = TestServer::start(200, "{}").await;
    let client = server.client();

    client
        .request(
            Method::GET,
            "/internal/archetype/strategy/A052",
            Some(&[("page", "2"), ("size", "50")][..]),
            None,
        )
        .await
        .unwrap();

    let request = server.captured().await;
    assert_eq!(request.path(), "/internal/archetype/strategy/A052");
    assert_eq!(request.query(), Some("page=2&size=50"));

    let expected = credentials().sign_message("GET|/internal/archetype/strategy/A052|1700000000");
    assert_eq!(request.header("x-signature"), Some(expected.as_str()));
}

#[tokio::test]
async fn test_trailing_slash_base_url() {
    let server = TestServer::start(200, STRATEGY_RESPONSE).await;
    let client = client_for(&format!("{}/", server.base_url()), 5);

    client.get_strategy_archetypes("A052").await.unwrap();
    let request = server.captured().await;
    assert_eq!(request.target, "/internal/archetype/strategy/A052");
}

// =============================================================================
// Error Mapping
// =============================================================================

#[tokio::test]
async fn test_401_is_auth_error() {
    let server = TestServer::start(401, r#"{"errmsg":"signature mismatch","errorcode":3}"#).await;
    let client = server.client();

    let err = client.get_strategy_archetypes("A052").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.status_code(), 401);
    assert_eq!(
        err.message(),
        "Authentication failed: Invalid API key or signature"
    );
    assert_eq!(err.error_code(), None);
}

#[tokio::test]
async fn test_404_is_api_error() {
    let server = TestServer::start(404, r#"{"errmsg":"not found","errorcode":42}"#).await;
    let client = server.client();

    let err = client.get_archetype("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "not found");
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.error_code(), Some(42));
    assert_eq!(err.to_string(), "[404] Error 42: not found");
}

#[tokio::test]
async fn test_500_empty_body() {
    let server = TestServer::start(500, "").await;
    let client = server.client();

    let err = client.get_archetype("A052071812").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "API error: 500");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_non_json_error_body_is_transport_error() {
    let server = TestServer::start(502, "<html>Bad Gateway</html>").await;
    let client = server.client();

    let err = client.get_strategy_archetypes("A052").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status_code(), 0);
    assert!(err.message().contains("malformed response"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = client_for(&closed_port_url().await, 5);

    let err = client.get_strategy_archetypes("A052").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status_code(), 0);
    assert!(err.message().starts_with("Request failed: "));
    assert!(err.message().to_lowercase().contains("refused"));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = TestServer::start_with_delay(200, STRATEGY_RESPONSE, Duration::from_secs(5)).await;
    let client = client_for(&server.base_url(), 1);

    let err = client.get_strategy_archetypes("A052").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status_code(), 0);
}
