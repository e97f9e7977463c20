//! Sale repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use armarinho_core::UserId;

use super::RepositoryError;
use crate::models::sale::{NewSale, Sale};

/// Repository for sale database operations.
pub struct SaleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SaleRepository<'a> {
    /// Create a new sale repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a sale made by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the customer does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user_id: UserId, sale: &NewSale) -> Result<Sale, RepositoryError> {
        sqlx::query_as::<_, Sale>(
            r"
            INSERT INTO pos.sale (user_id, customer_id, total, receipt_kind)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, user_id, customer_id, total, receipt_kind
            ",
        )
        .bind(user_id)
        .bind(sale.customer_id)
        .bind(sale.total)
        .bind(sale.receipt_kind)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "customer does not exist"))
    }

    /// Number of sales and their summed total since `since`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn summary_since(&self, since: DateTime<Utc>) -> Result<SalesSummary, RepositoryError> {
        let summary = sqlx::query_as::<_, SalesSummary>(
            r"
            SELECT COUNT(*) AS count, COALESCE(SUM(total), 0) AS total
            FROM pos.sale
            WHERE created_at >= $1
            ",
        )
        .bind(since)
        .fetch_one(self.pool)
        .await?;

        Ok(summary)
    }

    /// Most recent sales, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Sale>, RepositoryError> {
        let sales = sqlx::query_as::<_, Sale>(
            r"
            SELECT id, created_at, user_id, customer_id, total, receipt_kind
            FROM pos.sale
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(sales)
    }
}

/// Aggregate of sales over a period.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct SalesSummary {
    pub count: i64,
    pub total: Decimal,
}
