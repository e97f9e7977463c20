//! Authentication error types.

use thiserror::Error;

use crate::services::session::SessionError;
use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown login, inactive account or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Session could not be updated.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
