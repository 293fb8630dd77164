//! Canonical signing message

use crate::credentials::Credentials;

/// Separator between the parts of the signing message
const SEPARATOR: char = '|';

/// The parts of a request covered by its signature
///
/// Built fresh for every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    method: String,
    path: String,
    timestamp: String,
    canonical_body: Option<String>,
}

impl SignedRequest {
    /// Create a new signed request
    ///
    /// # Arguments
    /// * `method` - HTTP method, uppercased here
    /// * `path` - Exact request path with leading slash, no query string
    /// * `timestamp` - Unix time in seconds
    /// * `canonical_body` - Body already in canonical JSON form; an empty
    ///   string counts as no body
    pub fn new(
        method: &str,
        path: impl Into<String>,
        timestamp: i64,
        canonical_body: Option<String>,
    ) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            path: path.into(),
            timestamp: timestamp.to_string(),
            canonical_body: canonical_body.filter(|body| !body.is_empty()),
        }
    }

    /// Uppercased HTTP method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Timestamp in decimal form, as sent in `X-Timestamp`
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Canonical body, if the request has one
    pub fn canonical_body(&self) -> Option<&str> {
        self.canonical_body.as_deref()
    }

    /// The message the signature covers
    ///
    /// `METHOD|PATH|TIMESTAMP`, followed by `|BODY` when a body is present.
    pub fn message(&self) -> String {
        let body_len = self.canonical_body.as_ref().map_or(0, |body| body.len() + 1);
        let mut message = String::with_capacity(
            self.method.len() + self.path.len() + self.timestamp.len() + 2 + body_len,
        );

        message.push_str(&self.method);
        message.push(SEPARATOR);
        message.push_str(&self.path);
        message.push(SEPARATOR);
        message.push_str(&self.timestamp);
        if let Some(body) = &self.canonical_body {
            message.push(SEPARATOR);
            message.push_str(body);
        }
        message
    }

    /// Sign the message with the given credentials
    pub fn sign(&self, credentials: &Credentials) -> String {
        credentials.sign_message(&self.message())
    }
}
