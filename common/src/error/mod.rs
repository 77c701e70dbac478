//! Error types for the finance platform
//!
//! This module provides a unified error handling system shared by the account
//! service and the API gateway. Persistence failures surface as `Database` or
//! `Migration` and are passed through to callers untouched.

use std::fmt::Display;
use thiserror::Error;

/// Finance platform error type
#[derive(Debug, Error)]
pub enum Error {
    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Decimal conversion error
    #[error("Decimal conversion error: {0}")]
    DecimalError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::DecimalError(msg) => Error::DecimalError(format!("{}: {}", context, msg)),
                // Storage errors pass through unchanged
                Error::Database(e) => Error::Database(e),
                Error::Migration(e) => Error::Migration(e),
            }
        })
    }
}
