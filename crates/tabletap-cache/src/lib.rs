//! Type-safe key-value persistence layer for TableTap.
//!
//! Durable client-side state (the auth session, the persisted cart, cached
//! listing pages) is stored as opaque serialized records under
//! application-defined keys. On wasm32 the backing store is Spin's
//! Key-Value Store; natively it is an in-memory map so persistence paths
//! stay exercised by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use tabletap_cache::Cache;
//!
//! let cache = Cache::open_default()?;
//! cache.set("cart:hotel-7", &cart)?;
//! let cart: Option<Cart> = cache.get("cart:hotel-7")?;
//! cache.delete("cart:hotel-7")?;
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::Cache;
pub use session::{Session, SessionData, SessionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, Session, SessionId};
}
