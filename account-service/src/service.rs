//! Account service implementation

use std::sync::Arc;

use common::decimal::Money;
use common::error::{Error, ErrorExt, Result};
use common::model::{Account, AccountDto, AccountId, Currency};
use tracing::{debug, info};

use crate::config::AccountServiceConfig;
use crate::repository::{create_repository, AccountRepository, PostgresAccountRepository, RepositoryType};

/// Account service owning the account business rules.
///
/// This is the only place balances are computed and the only producer of
/// [`AccountDto`]s. It keeps no state between calls: every operation goes
/// straight to the repository.
pub struct AccountService {
    /// Repository for account data
    repo: Arc<dyn AccountRepository>,
}

impl AccountService {
    /// Create a new account service on top of a repository
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    /// Create a new account service with a specific repository type
    pub async fn with_repository(repo_type: RepositoryType) -> Result<Self> {
        Ok(Self::new(create_repository(repo_type).await?))
    }

    /// Create a new account service with a configuration
    pub async fn with_config(config: &AccountServiceConfig) -> Result<Self> {
        let repo: Arc<dyn AccountRepository> = Arc::new(
            PostgresAccountRepository::with_config(config).await?
        );

        Ok(Self::new(repo))
    }

    /// List all accounts with their current balances
    pub async fn list_accounts(&self) -> Result<Vec<AccountDto>> {
        let accounts = self.repo.get_all().await?;
        debug!("Listing {} accounts", accounts.len());

        accounts.iter().map(to_dto).collect()
    }

    /// Create a new account with no transactions.
    ///
    /// A missing identifier is stored as an empty string. Inputs are expected to
    /// have been validated by the caller.
    pub async fn create_account(
        &self,
        name: &str,
        identifier: Option<&str>,
        currency: Currency,
        initial_balance: Money,
    ) -> Result<AccountDto> {
        info!("Creating account '{}' in {}", name, currency);

        let identifier = identifier.unwrap_or_default();
        let account = Account::new(name, currency, initial_balance, identifier);

        let created = self.repo.add(account).await?;
        let dto = to_dto(&created).with_context(|| format!("Failed to create account '{}'", name))?;

        info!("Created account {}", dto.id);
        Ok(dto)
    }

    /// Delete an account, returning `false` when it does not exist
    pub async fn delete_account(&self, id: AccountId) -> Result<bool> {
        let deleted = self.repo.delete(id).await?;

        if deleted {
            info!("Deleted account {}", id);
        } else {
            debug!("Account {} not found for deletion", id);
        }

        Ok(deleted)
    }

    /// Check that the account storage is reachable
    pub async fn health_check(&self) -> Result<()> {
        self.repo.health_check().await
    }
}

/// Map a persisted account to its transfer representation
fn to_dto(account: &Account) -> Result<AccountDto> {
    let id = account
        .id()
        .ok_or_else(|| Error::Internal(format!("Account '{}' has no ID", account.name())))?;
    let balance = account.balance()?;

    Ok(AccountDto {
        id,
        name: account.name().to_string(),
        identifier: account.identifier().to_string(),
        currency: account.currency(),
        balance,
    })
}
