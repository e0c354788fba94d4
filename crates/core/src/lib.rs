//! GastoSmart Core - Domain entities, services, and traits.
//!
//! This crate contains the accounting rules for GastoSmart: how income,
//! expense and goal-contribution transactions combine into an available
//! balance, and how contributions move goal progress. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod analytics;
pub mod balance;
pub mod budget;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod recommendations;
pub mod reports;
pub mod transactions;
pub mod utils;

pub use balance::{compute_available_balance, summarize_balance, BalanceSummary};
pub use goals::contribute_to_goal;

// Re-export error types
pub use errors::Error;
pub use errors::ErrorKind;
pub use errors::Result;
