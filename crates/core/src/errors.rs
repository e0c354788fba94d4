//! Core error types for GastoSmart.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

use crate::goals::{ContributionError, GoalError};

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the accounting core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Contribution(#[from] ContributionError),

    #[error("{0}")]
    Goal(#[from] GoalError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Coarse classification of failures, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input. Surface to the user per field.
    Validation,
    /// A precondition of the accounting rules is unmet. Re-prompt, never retry.
    BusinessRule,
    /// A referenced goal, transaction or user does not exist.
    NotFound,
    /// A conflicting write was detected by the store.
    Conflict,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Contribution(e) => e.kind(),
            Error::Goal(e) => e.kind(),
            Error::ConstraintViolation(_) => ErrorKind::BusinessRule,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Database(DatabaseError::NotFound(_)) => ErrorKind::NotFound,
            Error::Database(DatabaseError::UniqueViolation(_)) => ErrorKind::Conflict,
            Error::Database(_) | Error::Unexpected(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable code for errors the UI renders specially.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Error::Contribution(e) => Some(e.code()),
            Error::Goal(e) => Some(e.code()),
            _ => None,
        }
    }

    /// Name of the input field the error concerns, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Contribution(e) => Some(e.field()),
            Error::Goal(e) => e.field(),
            Error::Validation(ValidationError::Field { field, .. }) => Some(field.as_str()),
            Error::Validation(ValidationError::MissingField(field)) => Some(field.as_str()),
            Error::Validation(ValidationError::AmountOverflow(_)) => Some("amount"),
            _ => None,
        }
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("{field}: {message}")]
    Field { field: String, message: String },

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),
}

impl ValidationError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::Field {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
