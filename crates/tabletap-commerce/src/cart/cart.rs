//! Cart and line item types.

use crate::cart::weight::{resolve_weight_price, WeightSelection};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One product entry with quantity in the shopping cart.
///
/// For weight-priced products `unit_price` is the resolved total for the
/// chosen weight, `original_price` keeps the per-100g reference, and
/// `weight` records the selection, so pricing is never re-derived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product id, the cart key.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Price for one unit of this line.
    pub unit_price: Money,
    /// Quantity, always >= 1 while the line exists.
    pub quantity: i64,
    /// Weight selection for per-100g priced products.
    pub weight: Option<WeightSelection>,
    /// Per-100g reference price for weight-priced products.
    pub original_price: Option<Money>,
}

impl CartLine {
    /// Total for this line (`unit_price * quantity`).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// The shopping cart: an insertion-ordered collection of lines keyed by
/// product id. Insertion order is display order.
///
/// Totals are always derived as pure reductions over the lines; no cached
/// aggregate exists to go stale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// The cart's currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add a unit-priced item.
    ///
    /// If a line with the same product id exists its quantity is
    /// incremented by `quantity`; otherwise a new line is appended.
    /// Quantities below 1 are rejected.
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        self.push_line(CartLine {
            id,
            name: name.into(),
            unit_price,
            quantity,
            weight: None,
            original_price: None,
        })
    }

    /// Add a weight-priced item, resolving the concrete price from the
    /// per-100g reference and the chosen selection.
    pub fn add_weighed(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        per_100g: Money,
        selection: WeightSelection,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let resolved = resolve_weight_price(per_100g, &selection)?;
        self.push_line(CartLine {
            id,
            name: name.into(),
            unit_price: resolved,
            quantity,
            weight: Some(selection),
            original_price: Some(per_100g),
        })
    }

    fn push_line(&mut self, line: CartLine) -> Result<(), CommerceError> {
        if line.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(line.quantity));
        }
        if line.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: line.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.id == line.id) {
            existing.quantity = existing
                .quantity
                .checked_add(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(());
        }

        self.lines.push(line);
        Ok(())
    }

    /// Remove the line matching `id`. No-op when absent.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        self.lines.len() < len_before
    }

    /// Increase the quantity of a line by one.
    ///
    /// Returns `Ok(false)` when no line matches.
    pub fn increment(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        match self.lines.iter_mut().find(|l| &l.id == id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(1).ok_or(CommerceError::Overflow)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Decrease the quantity of a line by one.
    ///
    /// A line at quantity 1 is removed; zero is treated as absence, never
    /// a visible zero-quantity row. Returns `false` when no line matches.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(pos) = self.lines.iter().position(|l| &l.id == id) else {
            return false;
        };
        if self.lines[pos].quantity <= 1 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity -= 1;
        }
        true
    }

    /// Empty the cart entirely.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total item count (sum of quantities), derived on demand.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Cart subtotal, derived on demand as a pure reduction.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let mut acc = Money::zero(self.currency);
        for line in &self.lines {
            if line.unit_price.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: line.unit_price.currency.code().to_string(),
                });
            }
            let line_total = line.line_total()?;
            acc = acc.try_add(&line_total).ok_or(CommerceError::Overflow)?;
        }
        Ok(acc)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::INR)
    }
}
