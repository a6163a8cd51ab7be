//! Auth error types.

use thiserror::Error;

/// Errors that can occur in authentication flows.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No authenticated session is present.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The session's role does not satisfy the route's requirement.
    #[error("Role {required} required, session has {actual}")]
    RoleMismatch { required: String, actual: String },

    /// Failed to read or write the persisted session.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl From<tabletap_cache::CacheError> for AuthError {
    fn from(e: tabletap_cache::CacheError) -> Self {
        AuthError::Storage(e.to_string())
    }
}
