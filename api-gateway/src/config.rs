//! Application configuration

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening address
    pub addr: String,
    /// Database URL, the in-memory repository is used when absent
    pub database_url: Option<String>,
    /// Database connection pool size
    pub db_pool_size: u32,
    /// Force the in-memory repository even when a database URL is set
    pub use_in_memory: bool,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            addr: env::var("API_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            db_pool_size: env::var("DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            use_in_memory: env::var("USE_IN_MEMORY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Whether accounts should be kept in memory instead of PostgreSQL
    pub fn in_memory(&self) -> bool {
        self.use_in_memory || self.database_url.is_none()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_without_database_url() {
        let config = AppConfig {
            addr: "127.0.0.1:0".to_string(),
            database_url: None,
            db_pool_size: 5,
            use_in_memory: false,
        };
        assert!(config.in_memory());

        let config = AppConfig {
            database_url: Some("postgres://localhost/finance".to_string()),
            ..config
        };
        assert!(!config.in_memory());

        let config = AppConfig { use_in_memory: true, ..config };
        assert!(config.in_memory());
    }
}
