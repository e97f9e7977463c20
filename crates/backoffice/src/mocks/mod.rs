//! In-memory implementations of the storage and session traits.
//!
//! Used by unit tests to exercise services without a database.

#![allow(clippy::unwrap_used)]

pub mod customers;
pub mod session;
pub mod users;

pub use customers::InMemoryCustomers;
pub use session::MemorySession;
pub use users::InMemoryUsers;
