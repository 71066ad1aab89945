//! Shared configuration and common types for the Fitline server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types, loaded once from the environment
//! - Error response structures

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
