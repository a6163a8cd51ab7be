//! User types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tabletap_commerce::ids::UserId;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Regular diner.
    #[default]
    Customer,
    /// Hotel staff running the admin board.
    Staff,
    /// Hotel administrator.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }

    /// Permission level; higher levels satisfy lower requirements.
    pub fn level(&self) -> u8 {
        match self {
            Role::Customer => 0,
            Role::Staff => 1,
            Role::Admin => 2,
        }
    }

    /// Check if this role has at least the given permission level.
    pub fn has_permission(&self, required: Role) -> bool {
        self.level() >= required.level()
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// A user of the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum User {
    /// Guest browsing and ordering without an account.
    Anonymous,
    /// Authenticated user, as issued by the backend.
    Authenticated {
        /// User ID.
        id: UserId,
        /// Email address.
        email: String,
        /// Display name.
        name: Option<String>,
        /// Authorization role.
        role: Role,
    },
}

impl User {
    /// Create an authenticated user.
    pub fn authenticated(
        id: UserId,
        email: impl Into<String>,
        name: Option<String>,
        role: Role,
    ) -> Self {
        User::Authenticated {
            id,
            email: email.into(),
            name,
            role,
        }
    }

    /// Check if the user is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, User::Authenticated { .. })
    }

    /// Get the user ID if authenticated.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            User::Authenticated { id, .. } => Some(id),
            User::Anonymous => None,
        }
    }

    /// The user's role; guests act as customers.
    pub fn role(&self) -> Role {
        match self {
            User::Authenticated { role, .. } => *role,
            User::Anonymous => Role::Customer,
        }
    }

    /// Check if the user satisfies the given permission level.
    pub fn has_permission(&self, required: Role) -> bool {
        self.is_authenticated() && self.role().has_permission(required)
    }

    /// Display name: the name when set, otherwise the email.
    pub fn display_name(&self) -> &str {
        match self {
            User::Authenticated { name, email, .. } => name.as_deref().unwrap_or(email.as_str()),
            User::Anonymous => "guest",
        }
    }
}

impl Default for User {
    fn default() -> Self {
        User::Anonymous
    }
}
