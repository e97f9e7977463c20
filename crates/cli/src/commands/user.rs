//! User management commands.
//!
//! # Environment Variables
//!
//! - `BACKOFFICE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `POS_USER_PASSWORD` - password, when `--password` is omitted

use armarinho_backoffice::db::PgUserRepository;
use armarinho_backoffice::models::NewUser;
use armarinho_backoffice::services::auth::hash_password;
use armarinho_core::{Role, UserId};

use super::{CliError, check_password, connect};

/// Create a back-office user with an Argon2id password hash.
///
/// # Returns
///
/// The ID of the created user.
pub async fn create(
    login: &str,
    name: &str,
    role: Role,
    password: &str,
) -> Result<UserId, CliError> {
    let login = login.trim();
    let name = name.trim();
    if login.is_empty() || name.is_empty() {
        return Err(CliError::InvalidInput(
            "login and name must not be empty".to_owned(),
        ));
    }
    check_password("password", password)?;

    let pool = connect().await?;

    tracing::info!("Creating user: {} ({})", login, role);
    let user = PgUserRepository::new(&pool)
        .create(&NewUser {
            login_name: login.to_owned(),
            display_name: name.to_owned(),
            password_hash: hash_password(password)?,
            role,
        })
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Login: {}, Role: {}",
        user.id,
        user.login_name,
        user.role
    );
    Ok(user.id)
}
