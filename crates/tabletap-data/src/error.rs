//! Error type for backend fetch operations.

use thiserror::Error;

/// Errors surfaced by the backend client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl ApiError {
    /// Whether the failure is a transport problem the user may retry,
    /// as opposed to a malformed response.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout(_) | ApiError::Connection(_) | ApiError::Http { status: 500..=599, .. }
        )
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ApiError {
    /// Map a reqwest error, preserving the timeout/connection distinction.
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e.to_string())
        } else if e.is_connect() {
            ApiError::Connection(e.to_string())
        } else if e.is_decode() {
            ApiError::Deserialization(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Timeout("10s".into()).is_transient());
        assert!(ApiError::Connection("refused".into()).is_transient());
        assert!(ApiError::Http {
            status: 503,
            url: "u".into()
        }
        .is_transient());
        assert!(!ApiError::Http {
            status: 404,
            url: "u".into()
        }
        .is_transient());
        assert!(!ApiError::Deserialization("bad json".into()).is_transient());
    }
}
