//! Request signing for the Archetype API
//!
//! Every request to the archetype service carries an HMAC-SHA256 signature
//! over a canonical message built from the method, path, timestamp, and
//! (optionally) the canonical JSON body:
//!
//! ```text
//! METHOD|PATH|TIMESTAMP
//! METHOD|PATH|TIMESTAMP|CANONICAL_JSON_BODY
//! ```
//!
//! Everything in this crate is pure: no network, no global state. The only
//! ambient input, the current time, comes in through the [`Clock`] trait.
//!
//! # Example
//!
//! ```
//! use archetype_auth::{Credentials, SignedRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::new("my-key", "my-secret")?;
//! let request = SignedRequest::new("get", "/internal/archetype/strategy/A052", 1_700_000_000, None);
//!
//! assert_eq!(request.message(), "GET|/internal/archetype/strategy/A052|1700000000");
//! let signature = request.sign(&creds);
//! assert_eq!(signature.len(), 64);
//! # Ok(())
//! # }
//! ```

pub mod canonical;
mod clock;
mod credentials;
mod error;
mod signer;

pub use canonical::{canonical_body, to_canonical_string};
pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthResult, CredentialsError};
pub use signer::SignedRequest;
