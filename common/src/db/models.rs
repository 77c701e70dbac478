use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::error::Result;
use crate::model::{Account, AccountId, Currency, Transaction};

/// Database model for Account table
#[derive(Debug, Clone, FromRow)]
pub struct DbAccount {
    pub id: AccountId,
    pub name: String,
    pub identifier: String,
    pub currency: String,
    pub initial_balance: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Database model for Transaction table
#[derive(Debug, Clone, FromRow)]
pub struct DbTransaction {
    pub id: i32,
    pub account_id: AccountId,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub description: String,
}

impl DbAccount {
    /// Build the domain account from this row and its transaction rows
    pub fn into_account(self, transactions: Vec<DbTransaction>) -> Result<Account> {
        let currency = self.currency.parse::<Currency>()?;
        let transactions = transactions
            .into_iter()
            .map(DbTransaction::into_transaction)
            .collect();

        Ok(Account::new(self.name, currency, self.initial_balance, self.identifier)
            .with_id(self.id)
            .with_transactions(transactions))
    }
}

impl DbTransaction {
    pub fn into_transaction(self) -> Transaction {
        Transaction::new(self.date, self.amount, self.description).with_id(self.id)
    }
}
