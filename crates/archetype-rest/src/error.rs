//! Error helpers for REST operations
//!
//! The error type itself lives in `archetype-types`; this module turns the
//! failures raised while building, sending, and decoding requests into it.

pub use archetype_types::{ArchetypeError, ArchetypeResult, ErrorKind};

use std::error::Error as StdError;

/// Prefix of every transport failure message
const REQUEST_FAILED: &str = "Request failed";

/// Transport error describing `err` and every error in its source chain
///
/// reqwest only names the outermost failure in its `Display` output
/// ("error sending request for url ..."), the actual cause such as a refused
/// connection or a timeout sits further down the chain.
pub fn request_failed(err: &(dyn StdError + 'static)) -> ArchetypeError {
    let mut message = format!("{}: {}", REQUEST_FAILED, err);
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    ArchetypeError::transport(message)
}

/// Transport error for a successful response whose body could not be decoded
pub fn malformed_response(err: &serde_json::Error) -> ArchetypeError {
    ArchetypeError::transport(format!("{}: malformed response: {}", REQUEST_FAILED, err))
}

/// Transport error for a client that could not be built
pub fn invalid_config(reason: impl std::fmt::Display) -> ArchetypeError {
    ArchetypeError::transport(format!("Invalid client configuration: {}", reason))
}
