//! Authenticated REST client for the Archetype API
//!
//! This crate signs every request with HMAC-SHA256 (see `archetype-auth`),
//! sends it, and turns the response into either parsed JSON or an
//! [`ArchetypeError`].
//!
//! # Authentication
//!
//! Each request carries `X-API-Key`, `X-Timestamp`, and `X-Signature`
//! headers. The signature covers `METHOD|PATH|TIMESTAMP` plus the canonical
//! JSON body when there is one. Query parameters are not signed.
//!
//! # Errors
//!
//! - HTTP 401 is [`ArchetypeError::Auth`]
//! - Any other HTTP status >= 400 is [`ArchetypeError::Api`], with the
//!   server's `errmsg`/`errorcode` when present
//! - Network failures, timeouts, and undecodable responses are
//!   [`ArchetypeError::Transport`] with status code 0
//!
//! Requests are attempted exactly once; retrying is up to the caller.
//!
//! # Example
//!
//! ```no_run
//! use archetype_rest::ArchetypeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ArchetypeClient::new("https://api.example.com", "your-api-key", "your-api-secret")?;
//!
//!     let strategy = client.get_strategy_archetypes("A052").await?;
//!     for id in strategy.iter() {
//!         let archetype = client.get_archetype(id).await?;
//!         println!("{}: {:?}", id, archetype.portfolio);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod response;
pub mod transport;

// Re-export main types
pub use client::{ArchetypeClient, ClientConfig};
pub use endpoints::ArchetypeEndpoints;
pub use error::{ArchetypeError, ArchetypeResult, ErrorKind};
pub use transport::SignedTransport;

// Re-export the pieces callers need to build a client
pub use archetype_auth::{Clock, Credentials, FixedClock, SystemClock};
pub use archetype_types::{Archetype, StrategyArchetypes};
pub use reqwest::Method;
