//! Sales screen service: product lookup and sale registration.

use sqlx::PgPool;
use thiserror::Error;

use super::session::{GateError, require_auth};
use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::db::sales::SaleRepository;
use crate::models::product::Product;
use crate::models::sale::{NewSale, Sale};
use crate::models::session::AuthContext;

/// Maximum products returned by a search.
pub const PRODUCT_SEARCH_LIMIT: i64 = 10;

/// Errors from sales operations.
#[derive(Debug, Error)]
pub enum SalesError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("customer does not exist")]
    UnknownCustomer,

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<GateError> for SalesError {
    fn from(_: GateError) -> Self {
        Self::Unauthenticated
    }
}

/// Sales operations for the logged-in user.
pub struct SalesService<'a> {
    pool: &'a PgPool,
}

impl<'a> SalesService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active products matching `term` by code or description.
    ///
    /// A blank term returns no products.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a session.
    pub async fn search_products(
        &self,
        ctx: Option<&AuthContext>,
        term: &str,
    ) -> Result<Vec<Product>, SalesError> {
        require_auth(ctx)?;

        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        Ok(ProductRepository::new(self.pool)
            .search(term, PRODUCT_SEARCH_LIMIT)
            .await?)
    }

    /// Register a sale made by the caller.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a session and `UnknownCustomer` if
    /// `customer_id` refers to no customer.
    pub async fn record(&self, ctx: Option<&AuthContext>, sale: NewSale) -> Result<Sale, SalesError> {
        let ctx = require_auth(ctx)?;

        let sale = SaleRepository::new(self.pool)
            .create(ctx.user_id, &sale)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => SalesError::UnknownCustomer,
                other => SalesError::Repository(other),
            })?;

        tracing::info!(
            sale_id = %sale.id,
            user_id = %sale.user_id,
            total = %sale.total.amount(),
            "Sale registered"
        );
        Ok(sale)
    }
}
