//! Common test utilities for integration tests
//!
//! Wraps a `wiremock` server that answers every request with one canned
//! response and records what it received.

#![allow(dead_code)]

use archetype_rest::{ArchetypeClient, ClientConfig, Credentials, FixedClock};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-api-secret";
pub const FIXED_TS: i64 = 1_700_000_000;

/// Sample response of the strategy endpoint
pub const STRATEGY_RESPONSE: &str = r#"{"archepids":["A052x"]}"#;

/// Sample response of the archetype endpoint
pub const ARCHETYPE_RESPONSE: &str =
    r#"{"archetypeportfolio":{"HSX:TPB":0.35,"HSX:SSI":0.25,"HSX:FPT":0.4}}"#;

/// Request as seen by the test server
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    fn from_request(request: &Request) -> Self {
        let target = match request.url.query() {
            Some(query) => format!("{}?{}", request.url.path(), query),
            None => request.url.path().to_string(),
        };
        let headers = request
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        Self {
            method: request.method.to_string(),
            target,
            headers,
            body: String::from_utf8(request.body.clone()).unwrap(),
        }
    }

    /// Header value, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request path without the query string
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    /// Raw query string, if any
    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }
}

pub struct TestServer {
    server: MockServer,
}

impl TestServer {
    /// Serve `body` with `status` immediately
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Serve `body` with `status` after waiting `delay`
    pub async fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_raw(body.to_string(), "application/json")
                    .set_delay(delay),
            )
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Client pointed at this server, signing with [`FIXED_TS`]
    pub fn client(&self) -> ArchetypeClient {
        client_for(&self.base_url(), 5)
    }

    /// The single request the server received
    pub async fn captured(&self) -> CapturedRequest {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording is enabled");
        assert_eq!(requests.len(), 1, "expected exactly one request");
        CapturedRequest::from_request(&requests[0])
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET).unwrap()
}

pub fn client_for(base_url: &str, timeout_secs: u64) -> ArchetypeClient {
    let config = ClientConfig::new(base_url, credentials())
        .with_timeout(timeout_secs)
        .without_proxy()
        .with_clock(Arc::new(FixedClock(FIXED_TS)));
    ArchetypeClient::with_config(config).unwrap()
}

/// Address nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
