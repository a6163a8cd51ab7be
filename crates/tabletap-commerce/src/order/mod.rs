//! Orders: the server-owned pending order a table accumulates.

mod order;

pub use order::{CheckoutOutcome, OrderStatus, PendingOrder};
