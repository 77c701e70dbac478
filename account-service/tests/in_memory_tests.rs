use std::sync::Arc;

use account_service::{AccountRepository, AccountService, InMemoryAccountRepository, RepositoryType};
use chrono::Utc;
use common::decimal::{dec, Money};
use common::model::{Account, Currency, Transaction};
use tokio_test::assert_ok;

fn service_with_repo() -> (AccountService, Arc<InMemoryAccountRepository>) {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let service = AccountService::new(repo.clone());
    (service, repo)
}

#[tokio::test]
async fn test_list_returns_empty_when_no_accounts() {
    let service = AccountService::with_repository(RepositoryType::InMemory).await.unwrap();

    let accounts = assert_ok!(service.list_accounts().await);
    assert!(accounts.is_empty());
}

#[tokio::test]
async fn test_list_computes_balance_from_transactions() {
    let (service, repo) = service_with_repo();
    let now = Utc::now();

    let account = Account::new("Test", Currency::USD, dec!(100), "id1").with_transactions(vec![
        Transaction::credit(now, dec!(50), "salary"),
        Transaction::debit(now, dec!(20), "rent"),
    ]);
    repo.add(account).await.unwrap();

    let accounts = service.list_accounts().await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Test");
    assert_eq!(accounts[0].currency, Currency::USD);
    assert_eq!(accounts[0].balance, dec!(130));
}

#[tokio::test]
async fn test_list_includes_id_and_identifier() {
    let (service, repo) = service_with_repo();
    let stored = repo
        .add(Account::new("Broker", Currency::GBP, dec!(0), "isa-2024"))
        .await
        .unwrap();

    let accounts = service.list_accounts().await.unwrap();
    assert_eq!(Some(accounts[0].id), stored.id());
    assert_eq!(accounts[0].identifier, "isa-2024");
}

#[tokio::test]
async fn test_list_balance_is_exact_for_many_small_amounts() -> anyhow::Result<()> {
    let (service, repo) = service_with_repo();
    let now = Utc::now();

    // One thousand cents credited and nine hundred ninety-nine debited
    let mut account = Account::new("Cents", Currency::EUR, dec!(0.01), "");
    for _ in 0..1000 {
        account.push_transaction(Transaction::new(now, dec!(0.01), ""));
    }
    for _ in 0..999 {
        account.push_transaction(Transaction::new(now, dec!(-0.01), ""));
    }
    repo.add(account).await?;

    let accounts = service.list_accounts().await?;
    assert_eq!(accounts[0].balance, dec!(0.02));
    Ok(())
}

#[tokio::test]
async fn test_list_reports_balance_overflow_as_error() {
    let (service, repo) = service_with_repo();
    let now = Utc::now();

    let account = Account::new("Huge", Currency::USD, Money::MAX, "")
        .with_transactions(vec![Transaction::credit(now, Money::MAX, "")]);
    repo.add(account).await.unwrap();

    let err = service.list_accounts().await.unwrap_err();
    assert!(matches!(err, common::Error::DecimalError(_)));
}

#[tokio::test]
async fn test_create_returns_full_transfer_object() {
    let (service, _repo) = service_with_repo();

    let dto = service
        .create_account("Test", Some("id1"), Currency::EUR, dec!(200))
        .await
        .unwrap();

    assert_ne!(dto.id, 0);
    assert_eq!(dto.name, "Test");
    assert_eq!(dto.identifier, "id1");
    assert_eq!(dto.currency, Currency::EUR);
    assert_eq!(dto.balance, dec!(200));
}

#[tokio::test]
async fn test_create_without_identifier_uses_empty_string() {
    let (service, repo) = service_with_repo();

    let dto = service
        .create_account("Cash", None, Currency::UAH, Money::ZERO)
        .await
        .unwrap();

    assert_eq!(dto.identifier, "");
    assert_eq!(dto.balance, Money::ZERO);
    assert_eq!(repo.accounts.get(&dto.id).unwrap().identifier(), "");
}

#[tokio::test]
async fn test_create_allows_negative_initial_balance() {
    let (service, _repo) = service_with_repo();

    let dto = service
        .create_account("Credit card", None, Currency::USD, dec!(-350.75))
        .await
        .unwrap();

    assert_eq!(dto.balance, dec!(-350.75));
}

#[tokio::test]
async fn test_create_always_produces_new_identity() {
    let (service, _repo) = service_with_repo();

    let first = service.create_account("Same", None, Currency::USD, dec!(1)).await.unwrap();
    let second = service.create_account("Same", None, Currency::USD, dec!(1)).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(service.list_accounts().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let (service, _repo) = service_with_repo();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_account(&format!("acc-{}", i), None, Currency::CAD, dec!(0))
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 32);
}

#[tokio::test]
async fn test_delete_missing_account_returns_false() {
    let (service, _repo) = service_with_repo();

    assert!(!service.delete_account(42).await.unwrap());
}

#[tokio::test]
async fn test_delete_existing_account() {
    let (service, _repo) = service_with_repo();

    let keep = service.create_account("Keep", None, Currency::USD, dec!(1)).await.unwrap();
    let removed = service.create_account("Drop", None, Currency::USD, dec!(2)).await.unwrap();

    assert!(service.delete_account(removed.id).await.unwrap());

    let remaining = service.list_accounts().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);

    // Deleting again is not an error
    assert!(!service.delete_account(removed.id).await.unwrap());
}

#[tokio::test]
async fn test_health_check_in_memory() {
    let (service, _repo) = service_with_repo();
    assert_ok!(service.health_check().await);
}
