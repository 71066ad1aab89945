//! Configuration for the token codec and service

use chrono::Duration;
use fl_shared::config::{JwtConfig, MAX_TOKEN_EXPIRY_SECONDS};

use crate::errors::DomainError;

/// Configuration for the token codec and service
///
/// Immutable once handed to [`TokenCodec::new`](super::TokenCodec::new).
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// Secret for signing access tokens
    pub access_token_secret: String,
    /// Secret for signing refresh tokens, distinct from the access secret
    pub refresh_token_secret: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime, longer than the access lifetime
    pub refresh_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from_jwt_config(&JwtConfig::default())
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("access_token_secret", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

impl TokenServiceConfig {
    /// Build from the shared JWT configuration (expiries in seconds)
    pub fn from_jwt_config(jwt: &JwtConfig) -> Self {
        Self {
            access_token_secret: jwt.access_token_secret.clone(),
            refresh_token_secret: jwt.refresh_token_secret.clone(),
            access_token_ttl: ttl_from_seconds(jwt.access_token_expiry),
            refresh_token_ttl: ttl_from_seconds(jwt.refresh_token_expiry),
        }
    }

    /// Check the invariants the codec depends on
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.access_token_secret.is_empty() || self.refresh_token_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "token secrets must not be empty".to_string(),
            });
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(DomainError::Validation {
                message: "access and refresh token secrets must differ".to_string(),
            });
        }
        if self.access_token_ttl <= Duration::zero() {
            return Err(DomainError::Validation {
                message: "access token lifetime must be positive".to_string(),
            });
        }
        if self.refresh_token_ttl <= self.access_token_ttl {
            return Err(DomainError::Validation {
                message: "refresh token lifetime must exceed access token lifetime".to_string(),
            });
        }
        if self.refresh_token_ttl > Duration::seconds(MAX_TOKEN_EXPIRY_SECONDS) {
            return Err(DomainError::Validation {
                message: format!(
                    "refresh token lifetime must not exceed {} seconds",
                    MAX_TOKEN_EXPIRY_SECONDS
                ),
            });
        }
        Ok(())
    }
}

/// Out-of-range second counts saturate and are then rejected by `validate`
fn ttl_from_seconds(seconds: i64) -> Duration {
    Duration::try_seconds(seconds).unwrap_or(if seconds < 0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}
