//! Database configuration module

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Database configuration for the refresh token store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL; `None` selects the in-memory store
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let url = std::env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                field: "DATABASE_MAX_CONNECTIONS",
                reason: format!("expected a positive integer, got {:?}", raw),
            })?,
            Err(_) => defaults.max_connections,
        };
        let connect_timeout = match std::env::var("DATABASE_CONNECT_TIMEOUT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                field: "DATABASE_CONNECT_TIMEOUT",
                reason: format!("expected seconds, got {:?}", raw),
            })?,
            Err(_) => defaults.connect_timeout,
        };

        Ok(Self {
            url,
            max_connections,
            connect_timeout,
        })
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Whether a persistent database is configured
    pub fn is_persistent(&self) -> bool {
        self.url.is_some()
    }
}
