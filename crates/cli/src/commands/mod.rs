//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use armarinho_backoffice::db::{self, RepositoryError};
use armarinho_backoffice::services::AuthError;
use armarinho_core::DocumentError;
use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Shortest password accepted for a new user.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Sample data is invalid.
    #[error("{0}")]
    Document(#[from] DocumentError),

    /// Rejected argument.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Connect to the back-office database.
///
/// Reads `BACKOFFICE_DATABASE_URL`, falling back to `DATABASE_URL`.
pub async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("BACKOFFICE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("BACKOFFICE_DATABASE_URL"))?;

    tracing::info!("Connecting to back-office database...");
    Ok(db::create_pool(&database_url).await?)
}

/// Reject passwords shorter than [`MIN_PASSWORD_LEN`].
pub fn check_password(label: &str, password: &str) -> Result<(), CliError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CliError::InvalidInput(format!(
            "{label} must have at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_password() {
        assert!(check_password("password", "12345678").is_ok());
        assert!(check_password("password", "1234567").is_err());
        // Counted in characters, not bytes
        assert!(check_password("password", "çççç").is_err());
    }
}
