//! Core domain types.

pub mod document;
pub mod id;
pub mod money;
pub mod role;
pub mod status;

pub use document::{Document, DocumentError, DocumentKind, format_document, normalize, validate};
pub use id::*;
pub use money::{Money, MoneyError};
pub use role::Role;
pub use status::{CashMovementKind, ReceiptKind};
