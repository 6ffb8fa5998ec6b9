//! Error types for the liftlog_core library.

use std::io;

/// Message reported for any 401/403 response, regardless of what the
/// backend put in the body.
pub const UNAUTHORIZED_MESSAGE: &str =
    "Unauthorized: token is invalid or expired. Try logging in again.";

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Network-level failure (connect, timeout, TLS, body read)
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 401/403 from the backend; carries the fixed message
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,

    /// Any other non-2xx response, with the backend message when present
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Local form validation failure, never reaches the network
    #[error("{0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session lifecycle error
    #[error("Session error: {0}")]
    Session(String),
}

impl Error {
    /// True for errors that should force a logout on the caller's side.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_carries_fixed_message() {
        let err = Error::Unauthorized;
        assert_eq!(err.to_string(), UNAUTHORIZED_MESSAGE);
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_api_error_displays_backend_message() {
        let err = Error::Api {
            status: 500,
            message: "something broke".into(),
        };
        assert_eq!(err.to_string(), "something broke");
        assert!(!err.is_auth_failure());
    }
}
