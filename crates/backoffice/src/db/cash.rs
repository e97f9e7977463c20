//! Cash-drawer movement repository.

use sqlx::PgPool;

use armarinho_core::{CashMovementKind, Money, UserId};

use super::RepositoryError;
use crate::models::cash::CashMovement;

/// Repository for cash movement database operations.
pub struct CashMovementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CashMovementRepository<'a> {
    /// Create a new cash movement repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a movement made by `user_id` and authorized by `authorized_by`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        kind: CashMovementKind,
        amount: Money,
        note: Option<&str>,
        authorized_by: UserId,
    ) -> Result<CashMovement, RepositoryError> {
        let movement = sqlx::query_as::<_, CashMovement>(
            r"
            INSERT INTO pos.cash_movement (user_id, kind, amount, note, authorized_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at, user_id, kind, amount, note, authorized_by
            ",
        )
        .bind(user_id)
        .bind(kind)
        .bind(amount)
        .bind(note)
        .bind(authorized_by)
        .fetch_one(self.pool)
        .await?;

        Ok(movement)
    }
}
