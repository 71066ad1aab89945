//! Periodic purge of expired refresh tokens
//!
//! Runs off the request path on a tokio interval so that expired records
//! which were never presented again do not accumulate.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

use super::service::TokenService;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

impl TokenCleanupConfig {
    /// Read `TOKEN_CLEANUP_INTERVAL` and `TOKEN_CLEANUP_ENABLED`, keeping
    /// defaults for unset or unparsable values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let interval_seconds = std::env::var("TOKEN_CLEANUP_INTERVAL")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(defaults.interval_seconds);
        let enabled = std::env::var("TOKEN_CLEANUP_ENABLED")
            .map(|raw| !matches!(raw.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
            .unwrap_or(defaults.enabled);

        Self {
            interval_seconds,
            enabled,
        }
    }
}

/// Service for purging expired refresh tokens
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    tokens: Arc<TokenService<R>>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository + 'static> TokenCleanupService<R> {
    /// Create a new token cleanup service
    pub fn new(tokens: Arc<TokenService<R>>, config: TokenCleanupConfig) -> Self {
        Self { tokens, config }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of the cycle
    /// * `Err(DomainError)` - If the repository sweep fails
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        let ran_at = Utc::now();
        if !self.config.enabled {
            return Ok(CleanupResult {
                expired_tokens_deleted: 0,
                ran_at,
            });
        }

        let expired_tokens_deleted = self.tokens.purge_expired().await?;
        info!(expired_tokens_deleted, "Token cleanup completed");

        Ok(CleanupResult {
            expired_tokens_deleted,
            ran_at,
        })
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs cleanup at regular intervals, starting
    /// immediately. Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Token cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    // Unavailable store: the next tick retries.
                    error!(error = %e, retryable = e.is_retryable(), "Token cleanup cycle failed");
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Clone)]
pub struct CleanupResult {
    /// Number of expired refresh tokens deleted
    pub expired_tokens_deleted: usize,
    /// When the cycle started
    pub ran_at: DateTime<Utc>,
}
