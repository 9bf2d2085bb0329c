//! Error types for the key manager

use std::io;

use thiserror::Error;

/// Result type alias for the key manager
pub type Result<T> = std::result::Result<T, Error>;

/// Key manager errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Assertion signing failed (malformed private key or encode failure)
    #[error("JWT signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The identity endpoint rejected the token exchange
    #[error("Authentication failed: HTTP {status} - {message}")]
    Auth {
        /// HTTP status returned by the identity endpoint
        status: u16,
        /// Response body
        message: String,
    },

    /// Non-success response from the KMS API
    #[error("KMS API error: HTTP {status} - {message}")]
    Api {
        /// HTTP status returned by the KMS API
        status: u16,
        /// Response body
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
