use std::env;
use std::path::PathBuf;
use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres};
use tracing::info;

use crate::error::{Error, Result};

pub mod models;

pub use models::{DbAccount, DbTransaction};

/// Database pool type
pub type DbPool = Pool<Postgres>;

/// Initialize the database connection pool
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!("Connected to PostgreSQL database with pool size: {}", max_connections);

    Ok(pool)
}

/// Location of the SQL migrations, `MIGRATIONS_DIR` overrides the workspace default
pub fn migrations_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("MIGRATIONS_DIR") {
        return Ok(PathBuf::from(dir));
    }

    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|root| root.join("migrations"))
        .ok_or_else(|| Error::ConfigurationError("Cannot locate migrations directory".to_string()))
}

/// Run migrations on the database
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrations_path = migrations_dir()?;
    info!("Running migrations from {}", migrations_path.display());

    sqlx::migrate::Migrator::new(migrations_path)
        .await?
        .run(pool)
        .await?;

    Ok(())
}
