//! Repository for account data

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use common::db::{self, DbAccount, DbTransaction};
use common::error::{Error, Result};
use common::model::{Account, AccountId, Transaction};
use dashmap::DashMap;
use futures::TryStreamExt;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::config::AccountServiceConfig;

/// Account repository trait defining the interface for account data storage
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Get all accounts with their transactions, ordered by ID
    async fn get_all(&self) -> Result<Vec<Account>>;

    /// Persist a new account and its transactions.
    ///
    /// The repository assigns the ID; any ID already set on `account` is ignored.
    async fn add(&self, account: Account) -> Result<Account>;

    /// Delete an account, returning `false` when no account has this ID
    async fn delete(&self, id: AccountId) -> Result<bool>;

    /// Check that the backing storage is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Repository Type
pub enum RepositoryType {
    /// In-memory repository
    InMemory,
    /// PostgreSQL repository
    Postgres(Option<String>),
}

/// Create a repository of the requested type
pub async fn create_repository(repo_type: RepositoryType) -> Result<Arc<dyn AccountRepository>> {
    let repo: Arc<dyn AccountRepository> = match repo_type {
        RepositoryType::InMemory => Arc::new(InMemoryAccountRepository::new()),
        RepositoryType::Postgres(database_url) => {
            Arc::new(PostgresAccountRepository::new(database_url).await?)
        }
    };

    Ok(repo)
}

/// In-memory repository for account data
pub struct InMemoryAccountRepository {
    /// Accounts by ID
    pub accounts: DashMap<AccountId, Account>,
    /// Last assigned account ID
    account_seq: AtomicI32,
    /// Last assigned transaction ID
    transaction_seq: AtomicI32,
}

impl InMemoryAccountRepository {
    /// Create a new in-memory account repository
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            account_seq: AtomicI32::new(0),
            transaction_seq: AtomicI32::new(0),
        }
    }

    fn next_account_id(&self) -> AccountId {
        self.account_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn next_transaction_id(&self) -> i32 {
        self.transaction_seq.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get_all(&self) -> Result<Vec<Account>> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|a| a.id());

        Ok(accounts)
    }

    async fn add(&self, account: Account) -> Result<Account> {
        let id = self.next_account_id();
        let transactions = account
            .transactions()
            .iter()
            .map(|t| t.clone().with_id(self.next_transaction_id()))
            .collect();

        let stored = Account::new(
            account.name(),
            account.currency(),
            account.initial_balance(),
            account.identifier(),
        )
        .with_id(id)
        .with_transactions(transactions);

        self.accounts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: AccountId) -> Result<bool> {
        Ok(self.accounts.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// PostgreSQL repository for account data
pub struct PostgresAccountRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Create a new PostgreSQL account repository
    pub async fn new(database_url: Option<String>) -> Result<Self> {
        let database_url = match database_url {
            Some(url) => url,
            None => std::env::var("DATABASE_URL")
                .map_err(|_| Error::ConfigurationError("DATABASE_URL must be set".to_string()))?,
        };

        let pool = db::init_db_pool(&database_url, 5).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL account repository with configuration
    pub async fn with_config(config: &AccountServiceConfig) -> Result<Self> {
        info!("Connecting to PostgreSQL database with pool size: {}", config.db_pool_size);

        let pool = db::init_db_pool(&config.database_url, config.db_pool_size).await?;

        if config.run_migrations {
            db::run_migrations(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Wrap an existing connection pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn get_all(&self) -> Result<Vec<Account>> {
        debug!("Loading all accounts from database");

        let rows: Vec<DbAccount> = sqlx::query_as(
            "SELECT id, name, identifier, currency, initial_balance, created_at
             FROM accounts
             ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // Group transactions by owning account
        let mut by_account: HashMap<AccountId, Vec<DbTransaction>> = HashMap::new();
        let mut transactions = sqlx::query_as::<_, DbTransaction>(
            "SELECT id, account_id, date, amount, description
             FROM transactions
             ORDER BY id"
        )
        .fetch(&self.pool);

        while let Some(tx) = transactions.try_next().await? {
            by_account.entry(tx.account_id).or_default().push(tx);
        }

        rows.into_iter()
            .map(|row| {
                let owned = by_account.remove(&row.id).unwrap_or_default();
                row.into_account(owned)
            })
            .collect()
    }

    async fn add(&self, account: Account) -> Result<Account> {
        debug!("Inserting account '{}' into database", account.name());

        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, AccountId>(
            "INSERT INTO accounts (name, identifier, currency, initial_balance)
             VALUES ($1, $2, $3, $4)
             RETURNING id"
        )
        .bind(account.name())
        .bind(account.identifier())
        .bind(account.currency().as_str())
        .bind(account.initial_balance())
        .fetch_one(&mut *tx)
        .await?;

        let mut transactions = Vec::with_capacity(account.transactions().len());
        for transaction in account.transactions() {
            let transaction_id = sqlx::query_scalar::<_, i32>(
                "INSERT INTO transactions (account_id, date, amount, description)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id"
            )
            .bind(id)
            .bind(transaction.date())
            .bind(transaction.amount())
            .bind(transaction.description())
            .fetch_one(&mut *tx)
            .await?;

            transactions.push(
                Transaction::new(transaction.date(), transaction.amount(), transaction.description())
                    .with_id(transaction_id),
            );
        }

        tx.commit().await?;

        Ok(Account::new(
            account.name(),
            account.currency(),
            account.initial_balance(),
            account.identifier(),
        )
        .with_id(id)
        .with_transactions(transactions))
    }

    async fn delete(&self, id: AccountId) -> Result<bool> {
        debug!("Deleting account {} from database", id);

        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
