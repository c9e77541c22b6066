//! Error types for fetching upstream status data.

use thiserror::Error;

/// Errors that can occur while fetching or validating upstream resources.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success status code.
    #[error("Endpoint returned status {status}")]
    Http { status: u16 },

    /// Could not reach the endpoint.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Any other transport-level failure.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The body decoded but failed shape validation.
    #[error("Invalid payload: {0}")]
    Invalid(String),

    /// A local resource could not be read.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            FetchError::Http { status: 503 }.to_string(),
            "Endpoint returned status 503"
        );
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::Parse(_)));
    }
}
