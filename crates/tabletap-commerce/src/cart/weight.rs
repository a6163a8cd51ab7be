//! Weight-based pricing for per-100g products.
//!
//! Some products (sweets sold loose) are priced per 100 grams rather than
//! per unit. The price is resolved to a concrete amount before the item
//! enters the cart; the cart never re-derives it.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Products priced per 100g. The catalog carries no flag for this; the
/// list mirrors the backend's convention of marking them by name.
pub const WEIGHT_PRICED_ITEMS: &[&str] = &[
    "Kaju Katli",
    "Rasgulla",
    "Gulab Jamun",
    "Soan Papdi",
    "Mysore Pak",
    "Besan Ladoo",
    "Jalebi",
    "Dry Fruit Mixture",
];

/// Check whether a product is priced per 100g.
pub fn is_weight_priced(name: &str) -> bool {
    WEIGHT_PRICED_ITEMS
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}

/// Unit for a weight selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeightUnit {
    #[default]
    Grams,
    Kilograms,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Grams => "g",
            WeightUnit::Kilograms => "kg",
        }
    }
}

/// A user-chosen quantity of a weight-priced product.
///
/// Quantities are clamped: grams in [50, 5000] step 50, kilograms in
/// [0.5, 10] step 0.5. Toggling the unit rescales the numeric quantity
/// without changing the physical quantity it represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightSelection {
    /// Numeric quantity in the chosen unit.
    pub quantity: f64,
    /// The chosen unit.
    pub unit: WeightUnit,
}

impl WeightSelection {
    pub const MIN_GRAMS: f64 = 50.0;
    pub const MAX_GRAMS: f64 = 5000.0;
    pub const GRAM_STEP: f64 = 50.0;

    pub const MIN_KG: f64 = 0.5;
    pub const MAX_KG: f64 = 10.0;
    pub const KG_STEP: f64 = 0.5;

    /// Create a selection in grams, clamped and snapped to the 50g step.
    pub fn grams(quantity: f64) -> Self {
        Self {
            quantity,
            unit: WeightUnit::Grams,
        }
        .clamped()
    }

    /// Create a selection in kilograms, clamped and snapped to the 0.5kg step.
    pub fn kilograms(quantity: f64) -> Self {
        Self {
            quantity,
            unit: WeightUnit::Kilograms,
        }
        .clamped()
    }

    fn bounds(&self) -> (f64, f64, f64) {
        match self.unit {
            WeightUnit::Grams => (Self::MIN_GRAMS, Self::MAX_GRAMS, Self::GRAM_STEP),
            WeightUnit::Kilograms => (Self::MIN_KG, Self::MAX_KG, Self::KG_STEP),
        }
    }

    /// Clamp into range and snap to the unit's step.
    fn clamped(mut self) -> Self {
        let (min, max, step) = self.bounds();
        let snapped = (self.quantity / step).round() * step;
        self.quantity = snapped.clamp(min, max);
        self
    }

    /// The selection expressed in whole grams.
    pub fn in_grams(&self) -> i64 {
        match self.unit {
            WeightUnit::Grams => self.quantity.round() as i64,
            WeightUnit::Kilograms => (self.quantity * 1000.0).round() as i64,
        }
    }

    /// Increase by one step, saturating at the maximum.
    pub fn step_up(&mut self) {
        let (_, _, step) = self.bounds();
        self.quantity += step;
        *self = self.clamped();
    }

    /// Decrease by one step, saturating at the minimum.
    pub fn step_down(&mut self) {
        let (_, _, step) = self.bounds();
        self.quantity -= step;
        *self = self.clamped();
    }

    /// Switch unit, rescaling the numeric quantity so the physical
    /// quantity is unchanged. Grams to kg divides by 1000 rounded to two
    /// decimals; kg to grams multiplies by 1000 rounded to the nearest
    /// integer.
    pub fn toggle_unit(&mut self) {
        match self.unit {
            WeightUnit::Grams => {
                self.quantity = (self.quantity / 1000.0 * 100.0).round() / 100.0;
                self.unit = WeightUnit::Kilograms;
            }
            WeightUnit::Kilograms => {
                self.quantity = (self.quantity * 1000.0).round();
                self.unit = WeightUnit::Grams;
            }
        }
    }
}

impl Default for WeightSelection {
    fn default() -> Self {
        Self::grams(Self::MIN_GRAMS)
    }
}

/// Resolve the concrete price for a weight selection.
///
/// `price = grams / 100 * per_100g`, computed in integer minor units with
/// half-up rounding. Unit-invariant: 500g and 0.5kg price identically.
pub fn resolve_weight_price(
    per_100g: Money,
    selection: &WeightSelection,
) -> Result<Money, CommerceError> {
    let grams = selection.in_grams();
    let scaled = per_100g
        .amount_minor
        .checked_mul(grams)
        .ok_or(CommerceError::Overflow)?;
    let minor = scaled
        .checked_add(50)
        .ok_or(CommerceError::Overflow)?
        / 100;
    Ok(Money::new(minor, per_100g.currency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_weight_priced_lookup() {
        assert!(is_weight_priced("Kaju Katli"));
        assert!(is_weight_priced("kaju katli"));
        assert!(!is_weight_priced("Masala Dosa"));
    }

    #[test]
    fn test_selection_clamp_and_snap() {
        assert_eq!(WeightSelection::grams(10.0).quantity, 50.0);
        assert_eq!(WeightSelection::grams(7000.0).quantity, 5000.0);
        assert_eq!(WeightSelection::grams(130.0).quantity, 150.0);
        assert_eq!(WeightSelection::kilograms(0.1).quantity, 0.5);
        assert_eq!(WeightSelection::kilograms(12.0).quantity, 10.0);
    }

    #[test]
    fn test_step_saturates() {
        let mut sel = WeightSelection::grams(5000.0);
        sel.step_up();
        assert_eq!(sel.quantity, 5000.0);

        let mut sel = WeightSelection::kilograms(0.5);
        sel.step_down();
        assert_eq!(sel.quantity, 0.5);
    }

    #[test]
    fn test_toggle_preserves_physical_quantity() {
        let mut sel = WeightSelection::grams(500.0);
        sel.toggle_unit();
        assert_eq!(sel.unit, WeightUnit::Kilograms);
        assert_eq!(sel.quantity, 0.5);
        assert_eq!(sel.in_grams(), 500);
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let original = 750.0;
        let mut sel = WeightSelection::grams(original);
        sel.toggle_unit();
        sel.toggle_unit();
        assert_eq!(sel.unit, WeightUnit::Grams);
        assert_eq!(sel.quantity, original);
    }

    #[test]
    fn test_price_unit_invariant() {
        let per_100g = Money::new(12050, Currency::INR);
        let in_grams = WeightSelection::grams(500.0);
        let in_kg = WeightSelection::kilograms(0.5);

        let a = resolve_weight_price(per_100g, &in_grams).unwrap();
        let b = resolve_weight_price(per_100g, &in_kg).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.amount_minor, 60250);
    }

    #[test]
    fn test_price_monotonic_in_quantity() {
        let per_100g = Money::new(9999, Currency::INR);
        let mut last = 0;
        let mut grams = WeightSelection::MIN_GRAMS;
        while grams <= WeightSelection::MAX_GRAMS {
            let sel = WeightSelection::grams(grams);
            let price = resolve_weight_price(per_100g, &sel).unwrap();
            assert!(price.amount_minor > last);
            last = price.amount_minor;
            grams += WeightSelection::GRAM_STEP;
        }
    }

    #[test]
    fn test_price_rounding_half_up() {
        // 50g at 1.01 per 100g: 101 * 50 / 100 = 50.5, rounds to 51
        let per_100g = Money::new(101, Currency::INR);
        let sel = WeightSelection::grams(50.0);
        let price = resolve_weight_price(per_100g, &sel).unwrap();
        assert_eq!(price.amount_minor, 51);
    }
}
