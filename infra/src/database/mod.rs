//! Database module - refresh token store implementations
//!
//! This module provides:
//! - Connection pool management
//! - The MySQL refresh token store and its schema
//! - An in-process store used when no database is configured

pub mod memory;

#[cfg(feature = "mysql")]
pub mod connection;
#[cfg(feature = "mysql")]
pub mod mysql;


// Re-export commonly used types
pub use memory::InMemoryTokenRepository;
#[cfg(feature = "mysql")]
pub use connection::{DatabasePool, PoolStatistics};
#[cfg(feature = "mysql")]
pub use mysql::MySqlTokenRepository;
