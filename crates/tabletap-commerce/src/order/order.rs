//! Order types.
//!
//! A pending order is owned by the server: the client reads it and
//! requests mutation (merge-append or create), never mutates it locally.

use crate::cart::CartLine;
use crate::ids::{HotelId, OrderId, TableNumber};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, not yet closed out by staff.
    #[default]
    Pending,
    /// Order marked completed by staff.
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }

    /// Check whether new cart submissions may still merge into the order.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

/// A server-tracked order for a given hotel and table, not yet marked
/// complete. New cart submissions for the same table merge into it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingOrder {
    /// Unique order identifier, minted by the server.
    pub id: OrderId,
    /// Tenant the order belongs to.
    pub hotel_id: HotelId,
    /// Physical table the order is attached to.
    pub table_number: TableNumber,
    /// Lines accumulated so far.
    pub items: Vec<CartLine>,
    /// Order total as last reported by the server.
    pub total: Money,
    /// Current status.
    pub status: OrderStatus,
    /// Unix timestamp of placement.
    pub placed_at: i64,
}

impl PendingOrder {
    /// Total item count across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Check whether the order still accepts merges.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// How a checkout concluded: a fresh order or a merge into an open one.
/// Carried to the confirmation view alongside the order id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutOutcome {
    /// A new order was created for the table.
    Created,
    /// The cart was appended to an existing open order.
    Merged,
}

impl CheckoutOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutOutcome::Created => "created",
            CheckoutOutcome::Merged => "merged",
        }
    }
}
