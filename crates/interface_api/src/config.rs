//! API configuration
//!
//! Values come from `API_`-prefixed environment variables (a `.env` file is
//! loaded first by the server binary). Anything unset keeps its default.

use serde::Deserialize;

use core_kernel::CoreError;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

/// Which repository adapter backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub max_connections: u32,
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    pub log_format: LogFormat,
    pub storage: StorageBackend,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/accounts".to_string(),
            max_connections: 10,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            storage: StorageBackend::Postgres,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, CoreError> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the server cannot start with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.storage == StorageBackend::Postgres && self.database_url.trim().is_empty() {
            return Err(CoreError::validation("database_url is required for postgres storage"));
        }
        if self.max_connections == 0 {
            return Err(CoreError::validation("max_connections must be at least 1"));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
