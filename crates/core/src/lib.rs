//! Armarinho Core - Shared domain types.
//!
//! This crate provides the types shared by every Armarinho component:
//! - `backoffice` - HTTP server for the point-of-sale back office
//! - `cli` - Command-line tools for migrations, seeding and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps document validation testable in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, tax-id documents, roles and money amounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
