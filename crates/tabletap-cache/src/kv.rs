//! Key-value store wrapper with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Mutex;

/// Typed cache with automatic JSON serialization.
///
/// Backed by Spin's Key-Value Store on wasm32. Natively the backing store
/// is an in-memory map, which keeps persistence logic observable in tests
/// rather than silently a no-op.
pub struct Cache {
    #[cfg(target_arch = "wasm32")]
    store: spin_sdk::key_value::Store,
    #[cfg(not(target_arch = "wasm32"))]
    store: Mutex<HashMap<String, Vec<u8>>>,
}

#[cfg(target_arch = "wasm32")]
impl Cache {
    /// Open the default Key-Value store.
    pub fn open_default() -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named Key-Value store.
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Get a value from the cache. Returns `None` if the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(CacheError::StoreError(e.to_string())),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store
            .set(key, &bytes)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store
            .delete(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store
            .exists(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Cache {
    /// Open the default store (in-memory outside wasm32).
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self {
            store: Mutex::new(HashMap::new()),
        })
    }

    /// Open a named store (in-memory outside wasm32).
    pub fn open(_name: &str) -> Result<Self, CacheError> {
        Self::open_default()
    }

    /// Get a value from the cache. Returns `None` if the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let store = self
            .store
            .lock()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        match store.get(key) {
            Some(bytes) => {
                let value: T = serde_json::from_slice(bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        store.insert(key.to_string(), bytes);
        Ok(())
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        store.remove(key);
        Ok(())
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let store = self
            .store
            .lock()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        Ok(store.contains_key(key))
    }
}

/// Helper to build cache keys with namespacing.
///
/// ```rust,ignore
/// let key = cache_key!("cart", hotel_id);
/// // "cart:hotel-7"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Record {
        name: String,
        count: i64,
    }

    #[test]
    fn test_set_get_round_trip() {
        let cache = Cache::open_default().unwrap();
        let record = Record {
            name: "table".to_string(),
            count: 5,
        };

        cache.set("k1", &record).unwrap();
        let loaded: Option<Record> = cache.get("k1").unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::open_default().unwrap();
        let loaded: Option<Record> = cache.get("absent").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_delete() {
        let cache = Cache::open_default().unwrap();
        cache.set("k1", &42_i64).unwrap();
        assert!(cache.exists("k1").unwrap());

        cache.delete("k1").unwrap();
        assert!(!cache.exists("k1").unwrap());
    }

    #[test]
    fn test_cache_key_macro() {
        let hotel = "hotel-7";
        assert_eq!(cache_key!("cart", hotel), "cart:hotel-7");
        assert_eq!(cache_key!("menu", hotel, 2), "menu:hotel-7:2");
    }
}
