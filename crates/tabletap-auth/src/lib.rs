//! Users, roles, persisted sessions, and route guards for TableTap.
//!
//! The backend issues the credentials; this crate only holds the session
//! state the client persists across reloads and the gate logic for
//! admin-only routes.

pub mod error;
pub mod guard;
pub mod session;
pub mod user;

pub use error::AuthError;
pub use guard::{check_access, Access};
pub use session::{AuthSession, SessionStore};
pub use user::{Role, User};
