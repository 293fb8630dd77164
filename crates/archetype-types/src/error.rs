//! Error types for Archetype API operations

use thiserror::Error;

/// Message used for every HTTP 401 response
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed: Invalid API key or signature";

/// Status code carried by transport-level failures
pub const TRANSPORT_STATUS: u16 = 0;

/// Broad category of an [`ArchetypeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server rejected the API key or signature (HTTP 401)
    Auth,
    /// The server answered with any other HTTP status >= 400
    Api,
    /// The request never produced a usable response
    Transport,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => write!(f, "auth"),
            Self::Api => write!(f, "api"),
            Self::Transport => write!(f, "transport"),
        }
    }
}

/// Errors returned by the Archetype API client
///
/// Every variant renders as `[<status>] <message>`, or
/// `[<status>] Error <code>: <message>` when the server supplied an error
/// code. None of them ever contain credential material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchetypeError {
    /// Authentication failed (HTTP 401)
    #[error("[401] {message}")]
    Auth {
        /// Human readable reason
        message: String,
    },

    /// API returned an error status
    #[error("{}", render(.status_code, .error_code, .message))]
    Api {
        /// Message from the `errmsg` field, or a generic fallback
        message: String,
        /// HTTP status code (>= 400)
        status_code: u16,
        /// Server supplied `errorcode`, if any
        error_code: Option<i64>,
    },

    /// Network, timeout, or decoding failure
    #[error("[0] {message}")]
    Transport {
        /// Description of the underlying failure
        message: String,
    },
}

fn render(status_code: &u16, error_code: &Option<i64>, message: &str) -> String {
    match error_code {
        Some(code) if *code != 0 => format!("[{}] Error {}: {}", status_code, code, message),
        _ => format!("[{}] {}", status_code, message),
    }
}

impl ArchetypeError {
    /// Create an authentication error with a custom message
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create the error returned for every HTTP 401 response
    pub fn auth_failed() -> Self {
        Self::auth(AUTH_FAILED_MESSAGE)
    }

    /// Create an API error from a status and the decoded error body fields
    pub fn api(message: impl Into<String>, status_code: u16, error_code: Option<i64>) -> Self {
        Self::Api {
            message: message.into(),
            status_code,
            error_code,
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Api { .. } => ErrorKind::Api,
            Self::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// Error message without the status prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Auth { message } | Self::Api { message, .. } | Self::Transport { message } => {
                message
            }
        }
    }

    /// HTTP status code, or 0 for transport failures
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Auth { .. } => 401,
            Self::Api { status_code, .. } => *status_code,
            Self::Transport { .. } => TRANSPORT_STATUS,
        }
    }

    /// Server supplied error code, if any
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Self::Api { error_code, .. } => *error_code,
            _ => None,
        }
    }

    /// Check if this is an authentication failure
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Check if the request failed before a response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if a caller could reasonably try the same request again
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Api { status_code, .. } => *status_code >= 500,
            Self::Auth { .. } => false,
        }
    }
}

/// Result type for Archetype API operations
pub type ArchetypeResult<T> = Result<T, ArchetypeError>;
