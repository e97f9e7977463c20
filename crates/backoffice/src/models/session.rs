//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use armarinho_core::{Role, UserId};

use super::user::User;

/// Session-stored identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// User's database ID.
    pub user_id: UserId,
    /// User's role, fixed at login.
    pub role: Role,
    /// User's display name.
    pub display_name: String,
}

impl From<&User> for AuthContext {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            display_name: user.display_name.clone(),
        }
    }
}

impl AuthContext {
    /// Whether the user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const AUTH_CONTEXT: &str = "auth_context";
}
