//! Customer repository.
//!
//! Document uniqueness is enforced by the `customer_document_unique`
//! constraint. A violation surfaces as `RepositoryError::Conflict`.

use std::future::Future;

use sqlx::PgPool;

use armarinho_core::{CustomerId, Document, DocumentKind, normalize};

use super::RepositoryError;
use crate::models::customer::{Customer, CustomerChanges, NewCustomer};

/// Storage for customer records.
///
/// Each method is a single statement, so every call is atomic on its own.
pub trait CustomerRepository: Send + Sync {
    fn find_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, RepositoryError>> + Send;

    fn find_by_document(
        &self,
        digits: &str,
    ) -> impl Future<Output = Result<Option<Customer>, RepositoryError>> + Send;

    /// Case-insensitive substring match on name or document, ordered by name.
    fn search(
        &self,
        term: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Customer>, RepositoryError>> + Send;

    fn insert(
        &self,
        customer: &NewCustomer,
    ) -> impl Future<Output = Result<Customer, RepositoryError>> + Send;

    /// Returns `None` when no row has this id.
    fn update(
        &self,
        id: CustomerId,
        changes: &CustomerChanges,
    ) -> impl Future<Output = Result<Option<Customer>, RepositoryError>> + Send;

    /// Returns `false` when no row has this id.
    fn delete(&self, id: CustomerId) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Escape `LIKE` metacharacters so user input only matches literally.
#[must_use]
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    name: String,
    kind: DocumentKind,
    document: Document,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            kind: row.kind,
            document: row.document,
            phone: row.phone,
            email: row.email,
            address: row.address,
        }
    }
}

/// `PostgreSQL`-backed customer repository.
pub struct PgCustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PgCustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Total number of registered customers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pos.customer")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

impl CustomerRepository for PgCustomerRepository<'_> {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, kind, document, phone, email, address
            FROM pos.customer
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn find_by_document(&self, digits: &str) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, kind, document, phone, email, address
            FROM pos.customer
            WHERE document = $1
            ",
        )
        .bind(digits)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn search(&self, term: &str, limit: i64) -> Result<Vec<Customer>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(term));
        // "123.456" should still find document 12345678901
        let digits = normalize(term);
        let digits_pattern = (!digits.is_empty()).then(|| format!("%{digits}%"));

        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, kind, document, phone, email, address
            FROM pos.customer
            WHERE name ILIKE $1 ESCAPE '\'
               OR document LIKE $1 ESCAPE '\'
               OR ($2::text IS NOT NULL AND document LIKE $2)
            ORDER BY name ASC, id ASC
            LIMIT $3
            ",
        )
        .bind(&pattern)
        .bind(digits_pattern)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            INSERT INTO pos.customer (name, kind, document, phone, email, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, kind, document, phone, email, address
            ",
        )
        .bind(&customer.name)
        .bind(customer.kind)
        .bind(&customer.document)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "document already registered"))?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: CustomerId,
        changes: &CustomerChanges,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            UPDATE pos.customer
            SET name = $2, phone = $3, email = $4, address = $5
            WHERE id = $1
            RETURNING id, name, kind, document, phone, email, address
            ",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.phone)
        .bind(&changes.email)
        .bind(&changes.address)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM pos.customer WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_plain_text_unchanged() {
        assert_eq!(escape_like("Maria"), "Maria");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
    }
}
