//! Signed HTTP transport
//!
//! Owns the HTTP client, base URL, credentials, and clock. Every call gets
//! its own timestamp and signature; nothing is shared between calls except
//! that immutable configuration.

use crate::client::ClientConfig;
use crate::error::{invalid_config, malformed_response, request_failed, ArchetypeResult};
use crate::response::map_response;
use archetype_auth::{canonical_body, Clock, Credentials, SignedRequest};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";
/// Header carrying the unix timestamp the signature was made with
pub const TIMESTAMP_HEADER: &str = "X-Timestamp";
/// Header carrying the hex HMAC-SHA256 signature
pub const SIGNATURE_HEADER: &str = "X-Signature";

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP transport that signs every request
#[derive(Clone)]
pub struct SignedTransport {
    http_client: Client,
    base_url: String,
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl SignedTransport {
    /// Build a transport from client configuration
    pub fn new(config: ClientConfig) -> ArchetypeResult<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(concat!(
                "archetype-rest/",
                env!("CARGO_PKG_VERSION")
            )));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http_client = builder.build().map_err(invalid_config)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials,
            clock: config.clock,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API key sent with every request
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Send a signed request and return the parsed JSON response
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Path appended to the base URL, e.g. `/internal/archetype/A052`
    /// * `query` - Query parameters, sent as-is and not signed
    /// * `body` - JSON body, sent in canonical form
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> ArchetypeResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        let body = canonical_body(body).map_err(|e| request_failed(&e))?;

        let signed = SignedRequest::new(method.as_str(), path, self.clock.unix_seconds(), body);
        let signature = signed.sign(&self.credentials);

        let mut request = self
            .http_client
            .request(method, &url)
            .header(API_KEY_HEADER, self.credentials.api_key())
            .header(TIMESTAMP_HEADER, signed.timestamp())
            .header(SIGNATURE_HEADER, signature)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE);

        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = signed.canonical_body() {
            request = request.body(body.to_owned());
        }

        debug!(timestamp = signed.timestamp(), "Sending signed request");

        let response = request.send().await.map_err(|e| request_failed(&e))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| request_failed(&e))?;

        debug!(status, len = bytes.len(), "Received response");

        map_response(status, &bytes)
    }

    /// Send a signed request and decode the response into `T`
    ///
    /// A body that does not match `T` is a transport error.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> ArchetypeResult<T> {
        let value = self.request(method, path, query, body).await?;
        serde_json::from_value(value).map_err(|e| malformed_response(&e))
    }
}

impl std::fmt::Debug for SignedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedTransport")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("clock", &self.clock)
            .finish()
    }
}
