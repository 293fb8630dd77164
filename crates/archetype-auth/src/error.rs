//! Error types for credential handling and signing

/// Errors that can occur while building credentials or signing input
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Request body could not be encoded
    #[error("Failed to encode request body: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result type for signing operations
pub type AuthResult<T> = Result<T, CredentialsError>;
