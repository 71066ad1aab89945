//! # Infrastructure Layer
//!
//! Concrete refresh token stores for the Fitline session service.
//!
//! ## Architecture
//!
//! - **Database**: MySQL store using SQLx, plus an in-process store for
//!   development and tests
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

pub mod database;

pub use database::memory::InMemoryTokenRepository;
#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlTokenRepository, PoolStatistics};

/// Infrastructure-specific error types
///
/// Raised while wiring stores at startup. Request-path failures are reported
/// as `DomainError` by the repositories themselves.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
