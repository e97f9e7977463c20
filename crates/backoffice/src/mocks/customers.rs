//! Spy customer repository.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use armarinho_core::{CustomerId, normalize};

use crate::db::{CustomerRepository, RepositoryError};
use crate::models::customer::{Customer, CustomerChanges, NewCustomer};

/// Customer repository over a shared vector that counts every call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomers {
    rows: Arc<Mutex<Vec<Customer>>>,
    next_id: Arc<AtomicUsize>,
    calls: Arc<AtomicUsize>,
    blind_document_lookup: bool,
}

impl InMemoryCustomers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `find_by_document` always miss, as if a concurrent insert had
    /// not committed yet. Uniqueness is then only enforced by `insert`.
    #[must_use]
    pub const fn with_blind_document_lookup(mut self) -> Self {
        self.blind_document_lookup = true;
        self
    }

    /// Number of repository calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stored customers.
    #[must_use]
    pub fn stored(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or_default()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn with_rows<T>(&self, f: impl FnOnce(&mut Vec<Customer>) -> T) -> Result<T, RepositoryError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| RepositoryError::DataCorruption("mutex poisoned".to_owned()))?;
        Ok(f(&mut rows))
    }
}

impl CustomerRepository for InMemoryCustomers {
    fn find_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, RepositoryError>> + Send {
        self.record_call();
        let found = self.with_rows(|rows| rows.iter().find(|c| c.id == id).cloned());
        async move { found }
    }

    fn find_by_document(
        &self,
        digits: &str,
    ) -> impl Future<Output = Result<Option<Customer>, RepositoryError>> + Send {
        self.record_call();
        let found = if self.blind_document_lookup {
            Ok(None)
        } else {
            self.with_rows(|rows| rows.iter().find(|c| c.document.as_str() == digits).cloned())
        };
        async move { found }
    }

    fn search(
        &self,
        term: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Customer>, RepositoryError>> + Send {
        self.record_call();
        let needle = term.to_lowercase();
        let digits = normalize(term);
        let limit = usize::try_from(limit).unwrap_or_default();

        let found = self.with_rows(|rows| {
            let mut matches: Vec<Customer> = rows
                .iter()
                .filter(|c| {
                    c.name.to_lowercase().contains(&needle)
                        || c.document.as_str().contains(&needle)
                        || (!digits.is_empty() && c.document.as_str().contains(&digits))
                })
                .cloned()
                .collect();
            matches.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.as_i32().cmp(&b.id.as_i32())));
            matches.truncate(limit);
            matches
        });
        async move { found }
    }

    fn insert(
        &self,
        customer: &NewCustomer,
    ) -> impl Future<Output = Result<Customer, RepositoryError>> + Send {
        self.record_call();
        let next_id = &self.next_id;
        let result = self.with_rows(|rows| {
            if rows.iter().any(|c| c.document == customer.document) {
                return Err(RepositoryError::Conflict(
                    "document already registered".to_owned(),
                ));
            }
            let id = i32::try_from(next_id.fetch_add(1, Ordering::SeqCst) + 1).unwrap_or(i32::MAX);
            let stored = Customer {
                id: CustomerId::new(id),
                name: customer.name.clone(),
                kind: customer.kind,
                document: customer.document.clone(),
                phone: customer.phone.clone(),
                email: customer.email.clone(),
                address: customer.address.clone(),
            };
            rows.push(stored.clone());
            Ok(stored)
        });
        async move { result.and_then(|inserted| inserted) }
    }

    fn update(
        &self,
        id: CustomerId,
        changes: &CustomerChanges,
    ) -> impl Future<Output = Result<Option<Customer>, RepositoryError>> + Send {
        self.record_call();
        let updated = self.with_rows(|rows| {
            rows.iter_mut().find(|c| c.id == id).map(|c| {
                c.name.clone_from(&changes.name);
                c.phone.clone_from(&changes.phone);
                c.email.clone_from(&changes.email);
                c.address.clone_from(&changes.address);
                c.clone()
            })
        });
        async move { updated }
    }

    fn delete(&self, id: CustomerId) -> impl Future<Output = Result<bool, RepositoryError>> + Send {
        self.record_call();
        let deleted = self.with_rows(|rows| {
            let before = rows.len();
            rows.retain(|c| c.id != id);
            rows.len() < before
        });
        async move { deleted }
    }
}
