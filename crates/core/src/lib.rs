//! Praxis Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for the practice management
//! application: the employee directory and the hour-balance ledgers
//! (vacation and overtime). It is database-agnostic and defines traits
//! that are implemented by the `storage-sqlite` crate.

pub mod employees;
pub mod errors;
pub mod ledger;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
