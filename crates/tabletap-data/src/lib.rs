//! Backend REST client for TableTap.
//!
//! The storefront core consumes, but does not define, a backend exposing
//! category, menu listing, and order endpoints. This crate holds the URL
//! builders, the wire envelopes (with money crossing as decimal numbers),
//! the fetch policy, and the [`StorefrontApi`] trait the rest of the
//! workspace programs against. The HTTP implementation uses reqwest
//! natively and Spin's outbound HTTP on wasm32.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod policy;

pub use client::{HttpApi, StorefrontApi};
pub use endpoints::Endpoints;
pub use error::ApiError;
pub use policy::FetchPolicy;
