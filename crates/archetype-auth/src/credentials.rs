//! API credentials for the Archetype service
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use sha2::Sha256;
use tracing::debug;

use crate::canonical::canonical_body;
use crate::error::{AuthResult, CredentialsError};
use crate::signer::SignedRequest;

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "ARCHETYPE_API_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "ARCHETYPE_API_SECRET";

/// API credentials for authenticated requests
///
/// The secret is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (sent in the clear as `X-API-Key`)
    api_key: String,
    /// Shared HMAC secret, never sent
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// The secret is used as-is (its UTF-8 bytes key the HMAC). Both values
    /// must be non-empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(CredentialsError::InvalidCredentials(
                "API key is empty".to_string(),
            ));
        }
        if api_secret.is_empty() {
            return Err(CredentialsError::InvalidCredentials(
                "API secret is empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `ARCHETYPE_API_KEY` and `ARCHETYPE_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| CredentialsError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| CredentialsError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        debug!("Loaded API credentials from environment");
        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// HMAC-SHA256 of `message`, as lowercase hex
    pub fn sign_message(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }

    /// Sign a request
    ///
    /// Builds the canonical message from the method, path, timestamp, and the
    /// canonical encoding of `body` (if any), then signs it. An empty object,
    /// empty array, or `null` body is left out of the message.
    ///
    /// # Arguments
    /// * `method` - HTTP method, any case
    /// * `path` - Request path without the query string
    /// * `timestamp` - Unix time in seconds
    /// * `body` - JSON body, if the request has one
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        timestamp: i64,
        body: Option<&Value>,
    ) -> AuthResult<String> {
        let body = canonical_body(body)?;
        Ok(SignedRequest::new(method, path, timestamp, body).sign(self))
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(4).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
