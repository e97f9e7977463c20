//! Customer management service.
//!
//! Validation always runs before any write reaches the repository.

use thiserror::Error;

use armarinho_core::{CustomerId, Document, DocumentError};

use super::session::{GateError, require_auth};
use crate::db::{CustomerRepository, RepositoryError};
use crate::models::customer::{
    CreateCustomer, Customer, CustomerChanges, NewCustomer, UpdateCustomer,
};
use crate::models::session::AuthContext;

/// Maximum results for a non-empty search.
pub const SEARCH_LIMIT: i64 = 20;

/// Maximum results when listing without a search term.
pub const LIST_LIMIT: i64 = 50;

/// Errors from customer operations.
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("a customer with this document already exists")]
    DuplicateDocument,

    #[error("customer not found")]
    NotFound,

    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<GateError> for CustomerError {
    fn from(_: GateError) -> Self {
        // Customer records are open to every role
        Self::Unauthenticated
    }
}

impl From<DocumentError> for CustomerError {
    fn from(e: DocumentError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<RepositoryError> for CustomerError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(_) => Self::DuplicateDocument,
            other => Self::Repository(other),
        }
    }
}

/// Customer operations over a [`CustomerRepository`].
pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    #[must_use]
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new customer.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` without a session
    /// - `Validation` for a wrong-length document or blank name
    /// - `DuplicateDocument` if the document is already registered
    pub async fn create(
        &self,
        ctx: Option<&AuthContext>,
        input: CreateCustomer,
    ) -> Result<Customer, CustomerError> {
        require_auth(ctx)?;

        let document = Document::parse(&input.document, input.kind)?;
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CustomerError::Validation("name must not be empty".to_owned()));
        }

        if self
            .repo
            .find_by_document(document.as_str())
            .await?
            .is_some()
        {
            return Err(CustomerError::DuplicateDocument);
        }

        let customer = NewCustomer {
            name: name.to_owned(),
            kind: input.kind,
            document,
            phone: clean(input.phone),
            email: clean(input.email),
            address: clean(input.address),
        };

        // A concurrent insert of the same document still fails here as a conflict
        let created = self.repo.insert(&customer).await?;
        tracing::info!(customer_id = %created.id, kind = %created.kind, "Customer created");
        Ok(created)
    }

    /// Change name and contact fields. Document and kind never change.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` without a session
    /// - `NotFound` if no customer has this id
    /// - `Validation` if the supplied name is blank
    pub async fn update(
        &self,
        ctx: Option<&AuthContext>,
        id: CustomerId,
        input: UpdateCustomer,
    ) -> Result<Customer, CustomerError> {
        require_auth(ctx)?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound)?;

        let name = match input.name {
            Some(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(CustomerError::Validation("name must not be empty".to_owned()));
                }
                name.to_owned()
            }
            None => existing.name,
        };

        let changes = CustomerChanges {
            name,
            phone: merge(input.phone, existing.phone),
            email: merge(input.email, existing.email),
            address: merge(input.address, existing.address),
        };

        self.repo
            .update(id, &changes)
            .await?
            .ok_or(CustomerError::NotFound)
    }

    /// Remove a customer permanently.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a session and `NotFound` if nothing was deleted.
    pub async fn delete(&self, ctx: Option<&AuthContext>, id: CustomerId) -> Result<(), CustomerError> {
        require_auth(ctx)?;

        if self.repo.delete(id).await? {
            tracing::info!(customer_id = %id, "Customer deleted");
            Ok(())
        } else {
            Err(CustomerError::NotFound)
        }
    }

    /// Fetch one customer.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a session and `NotFound` for an unknown id.
    pub async fn get(&self, ctx: Option<&AuthContext>, id: CustomerId) -> Result<Customer, CustomerError> {
        require_auth(ctx)?;

        self.repo.find_by_id(id).await?.ok_or(CustomerError::NotFound)
    }

    /// Search by name or document; an empty term lists the first customers by name.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a session.
    pub async fn search(
        &self,
        ctx: Option<&AuthContext>,
        term: &str,
    ) -> Result<Vec<Customer>, CustomerError> {
        require_auth(ctx)?;

        let term = term.trim();
        let limit = if term.is_empty() { LIST_LIMIT } else { SEARCH_LIMIT };
        Ok(self.repo.search(term, limit).await?)
    }
}

/// Trim an optional field; blank means absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// A supplied value replaces the stored one (blank clears it); an omitted value keeps it.
fn merge(supplied: Option<String>, existing: Option<String>) -> Option<String> {
    match supplied {
        Some(value) => clean(Some(value)),
        None => existing,
    }
}
