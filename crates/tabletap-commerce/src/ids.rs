//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a HotelId where a ProductId is expected. All IDs
//! originate server-side; the client never mints them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(HotelId);
define_id!(OrderId);
define_id!(UserId);

// Table numbers arrive as route parameters ("5", "12A"); they are opaque
// strings to the client, so they get the same newtype treatment.
define_id!(TableNumber);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("p-123");
        assert_eq!(id.as_str(), "p-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: HotelId = "hotel-7".into();
        assert_eq!(id.as_str(), "hotel-7");
    }

    #[test]
    fn test_id_display() {
        let id = TableNumber::new("5");
        assert_eq!(format!("{}", id), "5");
    }

    #[test]
    fn test_id_equality() {
        let id1 = OrderId::new("same");
        let id2 = OrderId::new("same");
        let id3 = OrderId::new("different");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }
}
