//! The persisted auth session.
//!
//! A successful login or registration writes the session to durable
//! client storage so it survives reloads; logout clears it. The stored
//! format is an opaque serialized record, not a public contract.

use crate::error::AuthError;
use crate::user::{Role, User};
use serde::{Deserialize, Serialize};
use tabletap_cache::Cache;

/// Storage key for the persisted session record.
const SESSION_KEY: &str = "auth:session";

/// An authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    /// The logged-in user.
    pub user: User,
    /// Unix timestamp of login.
    pub logged_in_at: i64,
}

impl AuthSession {
    /// Create a session for a user issued by the backend.
    pub fn new(user: User) -> Self {
        Self {
            user,
            logged_in_at: current_timestamp(),
        }
    }

    /// Whether a real login backs this session.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_authenticated()
    }

    /// Whether the session may enter admin routes.
    pub fn is_admin(&self) -> bool {
        self.user.has_permission(Role::Admin)
    }

    /// The session's role.
    pub fn role(&self) -> Role {
        self.user.role()
    }
}

/// Durable storage for the auth session.
pub struct SessionStore {
    cache: Cache,
}

impl SessionStore {
    /// Open the store.
    pub fn open() -> Result<Self, AuthError> {
        Ok(Self {
            cache: Cache::open_default()?,
        })
    }

    /// Record a successful login, persisting the session.
    pub fn login(&self, user: User) -> Result<AuthSession, AuthError> {
        if !user.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        let session = AuthSession::new(user);
        self.cache.set(SESSION_KEY, &session)?;
        Ok(session)
    }

    /// Record a successful registration. Registration logs the user in,
    /// so it persists the same way login does.
    pub fn register(&self, user: User) -> Result<AuthSession, AuthError> {
        self.login(user)
    }

    /// Load the persisted session, if any.
    pub fn load(&self) -> Result<Option<AuthSession>, AuthError> {
        Ok(self.cache.get(SESSION_KEY)?)
    }

    /// Clear the persisted session on logout.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.cache.delete(SESSION_KEY)?;
        Ok(())
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletap_commerce::ids::UserId;

    fn admin_user() -> User {
        User::authenticated(UserId::new("u1"), "admin@hotel.example", None, Role::Admin)
    }

    #[test]
    fn test_login_persists_session() {
        let store = SessionStore::open().unwrap();
        let session = store.login(admin_user()).unwrap();
        assert!(session.is_authenticated());
        assert!(session.is_admin());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_login_rejects_anonymous() {
        let store = SessionStore::open().unwrap();
        assert!(store.login(User::Anonymous).is_err());
    }

    #[test]
    fn test_logout_clears_session() {
        let store = SessionStore::open().unwrap();
        store.login(admin_user()).unwrap();
        store.logout().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_customer_session_is_not_admin() {
        let user = User::authenticated(UserId::new("u2"), "me@example.com", None, Role::Customer);
        let session = AuthSession::new(user);
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
    }
}
