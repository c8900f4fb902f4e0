//! Pensia Core - domain entities, services, and traits.
//!
//! This crate contains the business logic for Israeli pension and
//! provident fund performance data. It is database-agnostic and defines
//! the `FundStore` trait implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod funds;
pub mod utils;

// Re-export common types from the funds module
pub use funds::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
