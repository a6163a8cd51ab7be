//! Versioned session records on top of the key-value store.

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Maximum retry attempts for optimistic concurrency control.
const MAX_UPDATE_RETRIES: u32 = 3;

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Session record stored in the cache, generic over the payload type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData<T> {
    /// The session ID.
    pub id: SessionId,
    /// Application-defined session payload.
    pub data: T,
    /// Version for optimistic concurrency control.
    pub version: u64,
    /// Unix timestamp of creation.
    pub created_at: u64,
    /// Unix timestamp of last write.
    pub last_accessed: u64,
}

/// Session manager for durable per-session state.
pub struct Session<T> {
    cache: Cache,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Session<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Create a session manager on the default store.
    pub fn new() -> Result<Self, CacheError> {
        Ok(Self {
            cache: Cache::open_default()?,
            _phantom: std::marker::PhantomData,
        })
    }

    /// Create a session manager on a named store.
    pub fn with_store(name: &str) -> Result<Self, CacheError> {
        Ok(Self {
            cache: Cache::open(name)?,
            _phantom: std::marker::PhantomData,
        })
    }

    /// Get session data, creating a default record if absent.
    pub fn get_or_create(&self, id: &SessionId) -> Result<T, CacheError> {
        let key = self.session_key(id);
        match self.cache.get::<SessionData<T>>(&key)? {
            Some(record) => Ok(record.data),
            None => {
                let data = T::default();
                self.write(id, &data, 1, current_timestamp())?;
                Ok(data)
            }
        }
    }

    /// Get session data if it exists.
    pub fn get(&self, id: &SessionId) -> Result<Option<T>, CacheError> {
        let key = self.session_key(id);
        Ok(self.cache.get::<SessionData<T>>(&key)?.map(|s| s.data))
    }

    /// Set session data unconditionally, bumping the version.
    pub fn set(&self, id: &SessionId, data: &T) -> Result<(), CacheError> {
        let key = self.session_key(id);
        let (version, created_at) = match self.cache.get::<SessionData<T>>(&key)? {
            Some(existing) => (existing.version + 1, existing.created_at),
            None => (1, current_timestamp()),
        };
        self.write(id, data, version, created_at)
    }

    /// Delete a session.
    pub fn delete(&self, id: &SessionId) -> Result<(), CacheError> {
        let key = self.session_key(id);
        self.cache.delete(&key)
    }

    /// Check if a session exists.
    pub fn exists(&self, id: &SessionId) -> Result<bool, CacheError> {
        let key = self.session_key(id);
        self.cache.exists(&key)
    }

    /// Update session data with a closure under optimistic concurrency
    /// control, retrying on a detected concurrent write.
    pub fn update<F>(&self, id: &SessionId, f: F) -> Result<T, CacheError>
    where
        F: Fn(&mut T),
    {
        let key = self.session_key(id);

        for _attempt in 0..MAX_UPDATE_RETRIES {
            let current = self.cache.get::<SessionData<T>>(&key)?;
            let (mut data, expected_version, created_at) = match current {
                Some(record) => (record.data, record.version, record.created_at),
                None => (T::default(), 0, current_timestamp()),
            };

            f(&mut data);

            let new_version = expected_version + 1;
            self.write(id, &data, new_version, created_at)?;

            // Verify our version landed; a mismatch means another writer
            // got in between read and write.
            if let Some(written) = self.cache.get::<SessionData<T>>(&key)? {
                if written.version == new_version {
                    return Ok(data);
                }
                continue;
            }

            return Ok(data);
        }

        Err(CacheError::ConcurrentModification(
            "max retries exceeded".to_string(),
        ))
    }

    fn write(&self, id: &SessionId, data: &T, version: u64, created_at: u64) -> Result<(), CacheError> {
        let key = self.session_key(id);
        let record = SessionData {
            id: id.clone(),
            data: data.clone(),
            version,
            created_at,
            last_accessed: current_timestamp(),
        };
        self.cache.set(&key, &record)
    }

    fn session_key(&self, id: &SessionId) -> String {
        format!("session:{}", id)
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
