//! Domain models for the accounts platform

pub mod account;
pub mod currency;
pub mod transaction;

pub use account::{Account, AccountDto, AccountId};
pub use currency::Currency;
pub use transaction::{Transaction, TransactionType};
