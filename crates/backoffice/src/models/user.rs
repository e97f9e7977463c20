//! Back-office user models.

use serde::Serialize;

use armarinho_core::{Role, UserId};

/// A back-office user as seen by the rest of the application.
///
/// The password hash never leaves the credential store.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Database ID.
    pub id: UserId,
    /// Unique name typed at the login screen.
    pub login_name: String,
    /// Name shown in page headers.
    pub display_name: String,
    /// Permission level.
    pub role: Role,
    /// Inactive users cannot log in.
    pub active: bool,
}

/// Data needed to create a user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
}
