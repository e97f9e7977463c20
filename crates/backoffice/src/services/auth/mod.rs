//! Credential store.
//!
//! Verifies login and admin-authorization passwords against Argon2id hashes
//! held by a [`UserRepository`]. Plain-text passwords are never stored.

mod error;

use std::sync::LazyLock;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use armarinho_core::UserId;

use crate::db::UserRepository;
use crate::models::user::User;

/// Hash checked when a login name does not exist, so the response time does
/// not reveal which accounts exist.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("armarinho-timing-guard").unwrap_or_default());

/// Password verification over a user repository.
pub struct CredentialStore<U> {
    users: U,
}

impl<U: UserRepository> CredentialStore<U> {
    /// Create a credential store backed by `users`.
    #[must_use]
    pub const fn new(users: U) -> Self {
        Self { users }
    }

    /// Check a login name and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown login, an
    /// inactive account or a wrong password, without saying which.
    pub async fn verify_login(&self, login_name: &str, password: &str) -> Result<User, AuthError> {
        let Some(record) = self.users.find_active_by_login(login_name.trim()).await? else {
            let _ = verify_password(password, &DUMMY_HASH);
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &record.password_hash)?;
        Ok(record.user)
    }

    /// Check a password against every active admin.
    ///
    /// Returns the id of the admin whose password matched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no active admin has this password.
    pub async fn verify_admin_password(&self, password: &str) -> Result<UserId, AuthError> {
        let admins = self.users.active_admins().await?;
        if admins.is_empty() {
            let _ = verify_password(password, &DUMMY_HASH);
            return Err(AuthError::InvalidCredentials);
        }

        admins
            .iter()
            .find(|record| verify_password(password, &record.password_hash).is_ok())
            .map(|record| record.user.id)
            .ok_or(AuthError::InvalidCredentials)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password using Argon2id with a random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored PHC-format hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password doesn't match or
/// the hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use armarinho_core::Role;

    use super::*;
    use crate::mocks::InMemoryUsers;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("operador123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("operador123", &hash).is_ok());
        assert!(matches!(
            verify_password("operador124", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("x", "not-a-phc-string").is_err());
    }

    #[tokio::test]
    async fn test_verify_login() {
        let users = InMemoryUsers::new()
            .with_user("operador", "Operador", Role::Operator, "operador123", true);
        let store = CredentialStore::new(users);

        let user = store.verify_login("operador", "operador123").await.unwrap();
        assert_eq!(user.role, Role::Operator);
        assert_eq!(user.display_name, "Operador");
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let users = InMemoryUsers::new()
            .with_user("operador", "Operador", Role::Operator, "operador123", true)
            .with_user("antigo", "Antigo", Role::Operator, "antigo123", false);
        let store = CredentialStore::new(users);

        let unknown = store.verify_login("ninguem", "x").await.unwrap_err();
        let wrong = store.verify_login("operador", "x").await.unwrap_err();
        let inactive = store.verify_login("antigo", "antigo123").await.unwrap_err();

        for err in [unknown, wrong, inactive] {
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn test_verify_admin_password() {
        let users = InMemoryUsers::new()
            .with_user("operador", "Operador", Role::Operator, "operador123", true)
            .with_user("admin", "Administrador", Role::Admin, "java1814", true);
        let admin_id = users.id_of("admin").unwrap();
        let store = CredentialStore::new(users);

        assert_eq!(store.verify_admin_password("java1814").await.unwrap(), admin_id);
        // An operator's password never authorizes cash movements
        assert!(store.verify_admin_password("operador123").await.is_err());
    }

    #[tokio::test]
    async fn test_verify_admin_password_without_admins() {
        let store = CredentialStore::new(InMemoryUsers::new());
        assert!(matches!(
            store.verify_admin_password("anything").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
