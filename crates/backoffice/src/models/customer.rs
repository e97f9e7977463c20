//! Customer models.
//!
//! `CreateCustomer` and `UpdateCustomer` are raw request bodies. The service
//! turns them into `NewCustomer` and `CustomerChanges`, which the repository
//! accepts as already validated.

use serde::{Deserialize, Serialize};

use armarinho_core::{CustomerId, Document, DocumentKind, format_document};

/// A stored customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub kind: DocumentKind,
    /// Always digits only.
    pub document: Document,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Customer {
    /// Document with CPF/CNPJ punctuation, for display.
    #[must_use]
    pub fn formatted_document(&self) -> String {
        format_document(self.document.as_str(), self.kind)
    }
}

/// Body of a create request.
///
/// Missing `name` and `document` deserialize as empty strings so they fail
/// validation with a readable message instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCustomer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: DocumentKind,
    #[serde(default)]
    pub document: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Body of an update request.
///
/// Only these fields can change. Any `document` or `kind` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// A validated customer ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub kind: DocumentKind,
    pub document: Document,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Full set of mutable fields after merging an update over the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerChanges {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}
