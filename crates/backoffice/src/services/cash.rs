//! Cash-drawer movements (withdrawals and supplies).
//!
//! Every movement must be authorized by the password of an active admin. The
//! password is verified against the admin's hash and then discarded; only the
//! admin's id is recorded.

use sqlx::PgPool;
use thiserror::Error;

use armarinho_core::CashMovementKind;

use super::auth::{AuthError, CredentialStore};
use super::session::{GateError, require_auth};
use crate::db::RepositoryError;
use crate::db::cash::CashMovementRepository;
use crate::db::users::PgUserRepository;
use crate::models::cash::{CashMovement, CashMovementRequest};
use crate::models::session::AuthContext;

/// Errors from cash movement operations.
#[derive(Debug, Error)]
pub enum CashError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("invalid admin password")]
    InvalidAdminPassword,

    #[error("authorization error: {0}")]
    Auth(AuthError),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<GateError> for CashError {
    fn from(_: GateError) -> Self {
        Self::Unauthenticated
    }
}

impl From<AuthError> for CashError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => Self::InvalidAdminPassword,
            AuthError::Repository(e) => Self::Repository(e),
            other => Self::Auth(other),
        }
    }
}

/// Cash-drawer operations for the logged-in user.
pub struct CashService<'a> {
    pool: &'a PgPool,
}

impl<'a> CashService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a withdrawal or supply authorized by an admin password.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a session and
    /// `InvalidAdminPassword` if no active admin has the given password.
    pub async fn record(
        &self,
        ctx: Option<&AuthContext>,
        kind: CashMovementKind,
        request: CashMovementRequest,
    ) -> Result<CashMovement, CashError> {
        let ctx = require_auth(ctx)?;

        let authorized_by = CredentialStore::new(PgUserRepository::new(self.pool))
            .verify_admin_password(&request.admin_password)
            .await
            .inspect_err(|e| {
                if matches!(e, AuthError::InvalidCredentials) {
                    tracing::warn!(user_id = %ctx.user_id, %kind, "Cash movement with invalid admin password");
                }
            })?;

        let note = request
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let movement = CashMovementRepository::new(self.pool)
            .create(ctx.user_id, kind, request.amount, note, authorized_by)
            .await?;

        tracing::info!(
            movement_id = %movement.id,
            %kind,
            amount = %movement.amount.amount(),
            authorized_by = %authorized_by,
            "Cash movement recorded"
        );
        Ok(movement)
    }
}
