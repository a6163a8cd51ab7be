//! Shopping cart: line items, totals, weight-based pricing.

mod cart;
mod weight;

pub use cart::{Cart, CartLine};
pub use weight::{
    is_weight_priced, resolve_weight_price, WeightSelection, WeightUnit, WEIGHT_PRICED_ITEMS,
};
