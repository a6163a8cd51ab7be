//! Route guards.
//!
//! A protected route renders only when a valid session is present;
//! otherwise the user is redirected to the login view. Role-gated routes
//! additionally compare the required role and redirect to an
//! "unauthorized" view on mismatch.

use crate::session::AuthSession;
use crate::user::Role;

/// Outcome of a route guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the route.
    Granted,
    /// No valid session; redirect to the login view.
    LoginRedirect,
    /// Session present but the role requirement is not met; redirect to
    /// the unauthorized view.
    Unauthorized,
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }
}

/// Check whether a session may enter a route.
///
/// `required` of `None` guards on authentication alone.
pub fn check_access(session: Option<&AuthSession>, required: Option<Role>) -> Access {
    let Some(session) = session else {
        return Access::LoginRedirect;
    };
    if !session.is_authenticated() {
        return Access::LoginRedirect;
    }
    match required {
        Some(role) if !session.role().has_permission(role) => Access::Unauthorized,
        _ => Access::Granted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;
    use tabletap_commerce::ids::UserId;

    fn session(role: Role) -> AuthSession {
        AuthSession::new(User::authenticated(
            UserId::new("u1"),
            "user@example.com",
            None,
            role,
        ))
    }

    #[test]
    fn test_missing_session_redirects_to_login() {
        assert_eq!(check_access(None, None), Access::LoginRedirect);
        assert_eq!(
            check_access(None, Some(Role::Admin)),
            Access::LoginRedirect
        );
    }

    #[test]
    fn test_authenticated_session_passes_plain_guard() {
        let s = session(Role::Customer);
        assert_eq!(check_access(Some(&s), None), Access::Granted);
    }

    #[test]
    fn test_role_mismatch_is_unauthorized() {
        let s = session(Role::Customer);
        assert_eq!(
            check_access(Some(&s), Some(Role::Admin)),
            Access::Unauthorized
        );
    }

    #[test]
    fn test_admin_passes_role_gate() {
        let s = session(Role::Admin);
        assert_eq!(check_access(Some(&s), Some(Role::Admin)), Access::Granted);
        assert_eq!(check_access(Some(&s), Some(Role::Staff)), Access::Granted);
    }
}
