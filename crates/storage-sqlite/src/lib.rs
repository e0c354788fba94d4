//! SQLite storage implementation for GastoSmart.
//!
//! This crate is the only place where Diesel appears. It implements the
//! repository traits defined in `gastosmart-core` and contains:
//! - Database connection pooling and migrations
//! - The single-writer actor that serializes every write
//! - Repository implementations for goals, transactions and budgets
//!
//! ```text
//! core (domain, traits)
//!         │
//!         ▼
//! storage-sqlite (this crate)
//!         │
//!         ▼
//!     SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

pub mod budget;
pub mod goals;
pub mod transactions;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

pub use errors::{IntoCore, StorageError};

pub use gastosmart_core::errors::{DatabaseError, Error, Result};
