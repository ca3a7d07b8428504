//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::database::DatabaseConfig;

/// Object storage provider settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub base_url: String,
    pub service_key: String,
    pub bucket: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub storage: Option<StorageConfig>,
    /// Shared secret for webhook signature verification.
    pub webhook_secret: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        let storage = env::var("STORAGE_URL").ok().map(|base_url| StorageConfig {
            base_url,
            service_key: env::var("STORAGE_SERVICE_KEY").unwrap_or_default(),
            bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| "images".to_string()),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            storage,
            webhook_secret: env::var("WEBHOOK_SECRET").ok(),
        }
    }
}
