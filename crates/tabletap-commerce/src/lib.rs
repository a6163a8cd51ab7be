//! Domain types and logic for the TableTap storefront core.
//!
//! TableTap is the client-side core of a multi-tenant table-side food
//! ordering storefront. This crate holds the pure domain layer:
//!
//! - **Cart**: insertion-ordered line items keyed by product id
//! - **Weight pricing**: per-100g priced products with clamped selections
//! - **Catalog**: food item records grouped by category
//! - **Orders**: the server-owned pending order a table accumulates
//! - **Menu**: the paginated listing query and its page results
//!
//! Everything here is I/O-free; fetching and persistence live in the
//! `tabletap-data` and `tabletap-cache` crates.

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod menu;
pub mod order;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{
        is_weight_priced, resolve_weight_price, Cart, CartLine, WeightSelection, WeightUnit,
    };
    pub use crate::catalog::{group_by_category, sentinel_item, CategoryGroup, FoodItem};
    pub use crate::menu::{MenuPage, MenuQuery, PAGE_SIZE};
    pub use crate::order::{CheckoutOutcome, OrderStatus, PendingOrder};
}
