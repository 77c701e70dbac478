//! API Gateway for the accounts platform

use std::sync::Arc;

use api_gateway::config::AppConfig;
use api_gateway::{app, AppState};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Accounts API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (defaults to API_ADDR or 127.0.0.1:8080)
    #[clap(short, long)]
    addr: Option<String>,

    /// Database URL (defaults to DATABASE_URL)
    #[clap(short, long)]
    database_url: Option<String>,

    /// Keep accounts in memory instead of PostgreSQL
    #[clap(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,account_service=debug")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Debug logging enabled");

    // Command line flags take precedence over the environment
    let mut config = AppConfig::new();
    if let Some(addr) = args.addr {
        config.addr = addr;
    }
    if let Some(url) = args.database_url {
        config.database_url = Some(url);
    }
    config.use_in_memory |= args.in_memory;

    // Initialize services
    let state = Arc::new(AppState::from_config(&config).await?);
    let app = app(state);

    // Start the server
    let addr: std::net::SocketAddr = config.addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
