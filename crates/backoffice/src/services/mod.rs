//! Business logic services.
//!
//! Services take the caller's `Option<&AuthContext>` explicitly and check it
//! before touching storage.

pub mod auth;
pub mod cash;
pub mod customers;
pub mod sales;
pub mod session;

pub use auth::{AuthError, CredentialStore};
pub use cash::{CashError, CashService};
pub use customers::{CustomerError, CustomerService};
pub use sales::{SalesError, SalesService};
pub use session::{GateError, SessionError, SessionGate, SessionStore, require_auth, require_role};
