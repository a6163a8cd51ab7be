//! Domain error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Item not present in the cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Currency mismatch between money values.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
