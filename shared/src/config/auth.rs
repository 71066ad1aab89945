//! Authentication token configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::ConfigError;

const DEV_ACCESS_SECRET: &str = "development-access-secret-change-in-production";
const DEV_REFRESH_SECRET: &str = "development-refresh-secret-change-in-production";

/// Longest accepted lifetime for either token kind, in seconds (365 days)
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 365 * 86400;

/// JWT signing configuration for access and refresh tokens
///
/// Access and refresh tokens are signed with disjoint secrets so that a token
/// of one kind never verifies as the other.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret for signing access tokens
    pub access_token_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_token_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::from(DEV_ACCESS_SECRET),
            refresh_token_secret: String::from(DEV_REFRESH_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with the two signing secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_token_secret: access_secret.into(),
            refresh_token_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Load from environment variables
    ///
    /// Missing secrets fall back to development values outside production.
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let access_token_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if !environment.is_production() => defaults.access_token_secret,
            Err(_) => return Err(ConfigError::Missing("JWT_SECRET")),
        };
        let refresh_token_secret = match std::env::var("REFRESH_SECRET") {
            Ok(secret) => secret,
            Err(_) if !environment.is_production() => defaults.refresh_token_secret,
            Err(_) => return Err(ConfigError::Missing("REFRESH_SECRET")),
        };

        Ok(Self {
            access_token_secret,
            refresh_token_secret,
            access_token_expiry: parse_env("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry)?,
            refresh_token_expiry: parse_env("JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry)?,
        })
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days.saturating_mul(86400);
        self
    }

    /// Check if either secret is a development default (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.access_token_secret == DEV_ACCESS_SECRET
            || self.refresh_token_secret == DEV_REFRESH_SECRET
    }

    /// Validate secrets and expiry times
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_secret.is_empty() {
            return Err(ConfigError::Invalid {
                field: "access_token_secret",
                reason: "must not be empty".into(),
            });
        }
        if self.refresh_token_secret.is_empty() {
            return Err(ConfigError::Invalid {
                field: "refresh_token_secret",
                reason: "must not be empty".into(),
            });
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(ConfigError::Invalid {
                field: "refresh_token_secret",
                reason: "must differ from the access token secret".into(),
            });
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                field: "access_token_expiry",
                reason: "must be positive".into(),
            });
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(ConfigError::Invalid {
                field: "refresh_token_expiry",
                reason: format!(
                    "must exceed the access token expiry ({}s)",
                    self.access_token_expiry
                ),
            });
        }
        if self.refresh_token_expiry > MAX_TOKEN_EXPIRY_SECONDS {
            return Err(ConfigError::Invalid {
                field: "refresh_token_expiry",
                reason: format!("must not exceed {}s", MAX_TOKEN_EXPIRY_SECONDS),
            });
        }
        Ok(())
    }
}

fn parse_env(key: &'static str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            field: key,
            reason: format!("expected a number of seconds, got {:?}", raw),
        }),
        Err(_) => Ok(default),
    }
}
