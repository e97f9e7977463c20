//! Domain models for the back office.

pub mod cash;
pub mod customer;
pub mod product;
pub mod sale;
pub mod session;
pub mod user;

pub use cash::{CashMovement, CashMovementRequest};
pub use customer::{CreateCustomer, Customer, CustomerChanges, NewCustomer, UpdateCustomer};
pub use product::Product;
pub use sale::{NewSale, Sale};
pub use session::{AuthContext, keys as session_keys};
pub use user::{NewUser, User};
