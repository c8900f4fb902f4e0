//! SQLite storage implementation for Pensia.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the store traits defined in `pensia-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The fund repository backing all three category tables
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! Everything above it (`core`, the server) is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod funds;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use funds::FundRepository;

// Re-export from pensia-core for convenience
pub use pensia_core::errors::{DatabaseError, Error, Result};
