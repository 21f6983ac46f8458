//! Error types for the promotion API client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the promotion API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a response (connect, TLS, timeout)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response arrived but was not the expected JSON shape
    #[error("malformed response: {0}")]
    Decode(String),

    /// API answered with a non-success HTTP status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Well-formed response reporting failure during a startup lookup
    #[error("request refused: {0}")]
    Refused(String),

    /// Client settings could not be turned into a working client
    #[error("invalid client settings: {0}")]
    Config(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_constructor() {
        let error = ClientError::api_error(503, "down");
        assert!(error.is_server_error());
        assert_eq!(error.to_string(), "API error (status 503): down");
    }

    #[test]
    fn test_refused_is_not_server_error() {
        assert!(!ClientError::Refused("limit".into()).is_server_error());
    }
}
