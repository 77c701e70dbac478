//! Transaction models and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Increases the account balance
    Credit,
    /// Decreases the account balance
    Debit,
}

impl TransactionType {
    /// Classify a signed amount: zero and positive amounts are credits
    pub fn from_amount(amount: Money) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            TransactionType::Debit
        } else {
            TransactionType::Credit
        }
    }
}

/// A single signed movement against an account.
///
/// The amount can only be set at construction, and the [`TransactionType`] is
/// derived from its sign on every read, so the two never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Storage ID, assigned when the owning account is persisted
    id: Option<i32>,
    /// Booking date
    date: DateTime<Utc>,
    /// Signed amount, negative for debits
    amount: Money,
    /// Free text description
    #[serde(default)]
    description: String,
}

impl Transaction {
    /// Create a transaction from a signed amount
    pub fn new(date: DateTime<Utc>, amount: Money, description: impl Into<String>) -> Self {
        Self {
            id: None,
            date,
            amount,
            description: description.into(),
        }
    }

    /// Create a credit of the given magnitude
    pub fn credit(date: DateTime<Utc>, magnitude: Money, description: impl Into<String>) -> Self {
        Self::new(date, magnitude.abs(), description)
    }

    /// Create a debit of the given magnitude
    pub fn debit(date: DateTime<Utc>, magnitude: Money, description: impl Into<String>) -> Self {
        Self::new(date, -magnitude.abs(), description)
    }

    /// Attach the storage ID
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Signed amount
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Unsigned size of the movement
    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Transaction direction, derived from the amount sign
    pub fn kind(&self) -> TransactionType {
        TransactionType::from_amount(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::dec;

    #[test]
    fn test_type_follows_sign() {
        let now = Utc::now();
        assert_eq!(Transaction::new(now, dec!(12.50), "").kind(), TransactionType::Credit);
        assert_eq!(Transaction::new(now, dec!(0), "").kind(), TransactionType::Credit);
        assert_eq!(Transaction::new(now, dec!(-0.01), "").kind(), TransactionType::Debit);
    }

    #[test]
    fn test_negative_zero_is_credit() {
        let amount = -dec!(0.00);
        assert_eq!(TransactionType::from_amount(amount), TransactionType::Credit);
    }

    #[test]
    fn test_debit_and_credit_constructors() {
        let now = Utc::now();

        let debit = Transaction::debit(now, dec!(20), "groceries");
        assert_eq!(debit.amount(), dec!(-20));
        assert_eq!(debit.magnitude(), dec!(20));
        assert_eq!(debit.kind(), TransactionType::Debit);
        assert_eq!(debit.description(), "groceries");

        // Magnitude sign is ignored by the directional constructors
        let credit = Transaction::credit(now, dec!(-50), "");
        assert_eq!(credit.amount(), dec!(50));
        assert_eq!(credit.kind(), TransactionType::Credit);
    }

    #[test]
    fn test_description_defaults_to_empty_on_deserialize() {
        let json = r#"{"id":null,"date":"2024-01-02T03:04:05Z","amount":"-7.25"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.description(), "");
        assert_eq!(tx.amount(), dec!(-7.25));
        assert_eq!(tx.kind(), TransactionType::Debit);
    }
}
