//! Decimal type utilities for precise financial calculations

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Monetary amount with exact decimal precision
pub type Money = Decimal;
