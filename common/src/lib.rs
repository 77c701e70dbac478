//! Common types and utilities for the finance accounts platform
//!
//! This library contains the shared entity model, decimal helpers, the unified
//! error type and database access helpers used by the account service and the
//! API gateway.

pub mod error;
pub mod model;
pub mod decimal;
pub mod db;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use decimal::*;
pub use model::{Account, AccountDto, AccountId, Currency, Transaction, TransactionType};

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
