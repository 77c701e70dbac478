use account_service::{AccountService, AccountServiceConfig};
use clap::{Parser, Subcommand};
use common::db;
use common::model::Currency;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Account Service admin CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Database URL (defaults to DATABASE_URL)
    #[arg(short, long, global = true)]
    database_url: Option<String>,

    /// Database pool size
    #[arg(short, long, global = true)]
    pool_size: Option<u32>,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// List all accounts with their balances
    List,
    /// Create an account
    Create {
        /// Account name
        #[arg(long)]
        name: String,

        /// External identifier
        #[arg(long)]
        identifier: Option<String>,

        /// Currency code, e.g. USD
        #[arg(long)]
        currency: Currency,

        /// Initial balance
        #[arg(long, allow_hyphen_values = true)]
        balance: Decimal,
    },
    /// Delete an account by ID
    Delete {
        /// Account ID
        id: i32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "account_service={},common={}",
            cli.log_level, cli.log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Command line values take precedence over env vars
    let defaults = AccountServiceConfig::from_env();
    let config = AccountServiceConfig::new(
        cli.database_url.unwrap_or(defaults.database_url),
        cli.pool_size.unwrap_or(defaults.db_pool_size),
        defaults.run_migrations,
    );

    run(cli.command, config).await
}

async fn run(command: Commands, config: AccountServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Migrate => {
            let pool = db::init_db_pool(&config.database_url, config.db_pool_size).await?;
            db::run_migrations(&pool).await?;
            info!("Migrations applied");
        }
        Commands::List => {
            let service = AccountService::with_config(&config).await?;
            let accounts = service.list_accounts().await?;
            println!("{}", serde_json::to_string_pretty(&accounts)?);
        }
        Commands::Create { name, identifier, currency, balance } => {
            if name.trim().is_empty() {
                return Err("Account name must not be empty".into());
            }

            let service = AccountService::with_config(&config).await?;
            let account = service
                .create_account(&name, identifier.as_deref(), currency, balance)
                .await?;
            println!("{}", serde_json::to_string_pretty(&account)?);
        }
        Commands::Delete { id } => {
            let service = AccountService::with_config(&config).await?;
            if service.delete_account(id).await? {
                info!("Account {} deleted", id);
            } else {
                return Err(format!("Account not found: {}", id).into());
            }
        }
    }

    Ok(())
}
