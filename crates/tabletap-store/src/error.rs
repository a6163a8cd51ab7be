//! Store error types.

use thiserror::Error;

/// Errors surfaced by the application store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A checkout is already in flight; the control stays disabled.
    #[error("Checkout already in flight")]
    CheckoutInFlight,

    /// Nothing to check out.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Domain-level failure (quantity, currency, overflow).
    #[error(transparent)]
    Commerce(#[from] tabletap_commerce::CommerceError),

    /// Backend failure.
    #[error(transparent)]
    Api(#[from] tabletap_data::ApiError),

    /// Persisted-state failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<tabletap_cache::CacheError> for StoreError {
    fn from(e: tabletap_cache::CacheError) -> Self {
        StoreError::Storage(e.to_string())
    }
}
