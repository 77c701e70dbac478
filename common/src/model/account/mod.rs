//! Account models and related types

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::error::{Error, Result};
use crate::model::currency::Currency;
use crate::model::transaction::{Transaction, TransactionType};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Storage identifier of an account
pub type AccountId = i32;

/// Account aggregate.
///
/// Owns its transactions. The current balance is never stored; it is computed
/// from the initial balance and the transactions whenever it is asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Storage ID, `None` until the account is persisted
    id: Option<AccountId>,
    /// Display name
    name: String,
    /// External reference, empty when not supplied
    #[serde(default)]
    identifier: String,
    /// Account currency, fixed at creation
    currency: Currency,
    /// Balance the account was opened with
    initial_balance: Money,
    /// Owned transactions, order is irrelevant to the balance
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl Account {
    /// Create a new, not yet persisted account without transactions
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        initial_balance: Money,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            identifier: identifier.into(),
            currency,
            initial_balance,
            transactions: Vec::new(),
        }
    }

    /// Attach the storage ID
    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace the owned transactions
    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn id(&self) -> Option<AccountId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn initial_balance(&self) -> Money {
        self.initial_balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Record a transaction against this account
    pub fn push_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Sum of credit magnitudes
    pub fn credit_total(&self) -> Result<Money> {
        self.total_of(TransactionType::Credit)
    }

    /// Sum of debit magnitudes
    pub fn debit_total(&self) -> Result<Money> {
        self.total_of(TransactionType::Debit)
    }

    /// Current balance: initial balance plus credits minus debits.
    ///
    /// Fails with [`Error::DecimalError`] when the result leaves the `Decimal` range.
    pub fn balance(&self) -> Result<Money> {
        let credits = self.credit_total()?;
        let debits = self.debit_total()?;

        // Both totals are non-negative, so their difference always fits
        credits
            .checked_sub(debits)
            .and_then(|net| self.initial_balance.checked_add(net))
            .ok_or_else(|| self.overflow("balance"))
    }

    fn total_of(&self, kind: TransactionType) -> Result<Money> {
        self.transactions
            .iter()
            .filter(|t| t.kind() == kind)
            .try_fold(Money::ZERO, |total, t| total.checked_add(t.magnitude()))
            .ok_or_else(|| self.overflow("transaction total"))
    }

    fn overflow(&self, what: &str) -> Error {
        Error::DecimalError(format!("{} of account '{}' overflowed", what, self.name))
    }
}

/// Transfer representation of an account, exposed across the service boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct AccountDto {
    /// Account ID
    #[cfg_attr(feature = "utoipa", schema(value_type = i32))]
    pub id: AccountId,
    /// Account name
    pub name: String,
    /// External reference, empty when not supplied
    pub identifier: String,
    /// Account currency
    pub currency: Currency,
    /// Computed current balance
    #[cfg_attr(feature = "utoipa", schema(value_type = String, example = "130.00"))]
    pub balance: Money,
}
