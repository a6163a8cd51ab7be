//! Persisted cart storage.
//!
//! The cart is stashed per hotel under an application-defined key and
//! rehydrated on session start, so a reload does not lose an in-progress
//! order. The stored format is an opaque serialized record.

use crate::error::StoreError;
use tabletap_cache::{cache_key, Cache};
use tabletap_commerce::cart::Cart;
use tabletap_commerce::ids::HotelId;

/// Durable storage for per-hotel carts.
pub struct CartStorage {
    cache: Cache,
}

impl CartStorage {
    /// Open the store.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self {
            cache: Cache::open_default()?,
        })
    }

    /// Persist the cart for a hotel.
    pub fn save(&self, hotel: &HotelId, cart: &Cart) -> Result<(), StoreError> {
        self.cache.set(&cache_key!("cart", hotel), cart)?;
        Ok(())
    }

    /// Load the persisted cart for a hotel, if any.
    pub fn load(&self, hotel: &HotelId) -> Result<Option<Cart>, StoreError> {
        Ok(self.cache.get(&cache_key!("cart", hotel))?)
    }

    /// Drop the persisted cart for a hotel.
    pub fn clear(&self, hotel: &HotelId) -> Result<(), StoreError> {
        self.cache.delete(&cache_key!("cart", hotel))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletap_commerce::ids::ProductId;
    use tabletap_commerce::money::{Currency, Money};

    #[test]
    fn test_save_load_clear() {
        let storage = CartStorage::open().unwrap();
        let hotel = HotelId::new("h1");

        let mut cart = Cart::default();
        cart.add_item(
            ProductId::new("p1"),
            "Dosa",
            Money::from_decimal(60.0, Currency::INR),
            2,
        )
        .unwrap();

        storage.save(&hotel, &cart).unwrap();
        assert_eq!(storage.load(&hotel).unwrap(), Some(cart));

        storage.clear(&hotel).unwrap();
        assert!(storage.load(&hotel).unwrap().is_none());
    }

    #[test]
    fn test_carts_are_per_hotel() {
        let storage = CartStorage::open().unwrap();
        let mut cart = Cart::default();
        cart.add_item(
            ProductId::new("p1"),
            "Dosa",
            Money::from_decimal(60.0, Currency::INR),
            1,
        )
        .unwrap();

        storage.save(&HotelId::new("h1"), &cart).unwrap();
        assert!(storage.load(&HotelId::new("h2")).unwrap().is_none());
    }
}
