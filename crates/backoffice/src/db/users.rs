//! User repository for credential lookups and account creation.

use std::future::Future;

use sqlx::PgPool;

use armarinho_core::{Role, UserId};

use super::RepositoryError;
use crate::models::user::{NewUser, User};

/// A user together with its stored password hash.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Read access to user accounts, as needed by the credential store.
pub trait UserRepository: Send + Sync {
    /// Find an active user by login name.
    fn find_active_by_login(
        &self,
        login_name: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, RepositoryError>> + Send;

    /// All active users with the admin role.
    fn active_admins(&self) -> impl Future<Output = Result<Vec<UserRecord>, RepositoryError>> + Send;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    login_name: String,
    display_name: String,
    password_hash: String,
    role: Role,
    active: bool,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            user: User {
                id: row.id,
                login_name: row.login_name,
                display_name: row.display_name,
                role: row.role,
                active: row.active,
            },
            password_hash: row.password_hash,
        }
    }
}

/// `PostgreSQL`-backed user repository.
pub struct PgUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PgUserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Number of user accounts, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pos.app_user")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Create a user account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the login name is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO pos.app_user (login_name, display_name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, login_name, display_name, password_hash, role, active
            ",
        )
        .bind(&user.login_name)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "login name already exists"))?;

        Ok(UserRecord::from(row).user)
    }
}

impl UserRepository for PgUserRepository<'_> {
    async fn find_active_by_login(
        &self,
        login_name: &str,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, login_name, display_name, password_hash, role, active
            FROM pos.app_user
            WHERE login_name = $1 AND active
            ",
        )
        .bind(login_name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn active_admins(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, login_name, display_name, password_hash, role, active
            FROM pos.app_user
            WHERE role = 'admin' AND active
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }
}
