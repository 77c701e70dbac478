//! Account service: balance computation and account lifecycle on top of a repository

pub mod service;
pub mod repository;
pub mod config;

pub use service::AccountService;
pub use repository::{
    create_repository, AccountRepository, InMemoryAccountRepository, PostgresAccountRepository,
    RepositoryType,
};
pub use config::AccountServiceConfig;
