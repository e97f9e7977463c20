//! Product repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use armarinho_core::ProductId;

use super::RepositoryError;
use super::customers::escape_like;
use crate::models::product::Product;

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active products whose code or description contains `term`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(term));
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, code, description, sale_price, stock
            FROM pos.product
            WHERE active
              AND (code ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\')
            ORDER BY description ASC
            LIMIT $2
            ",
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a catalog product, used by seeding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code already exists.
    pub async fn create(
        &self,
        code: &str,
        description: &str,
        sale_price: Decimal,
        stock: i32,
    ) -> Result<ProductId, RepositoryError> {
        sqlx::query_scalar::<_, ProductId>(
            r"
            INSERT INTO pos.product (code, description, sale_price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(code)
        .bind(description)
        .bind(sale_price)
        .bind(stock)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "product code already exists"))
    }
}
