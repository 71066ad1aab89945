//! Token module for session management
//!
//! This module handles all token-related operations including:
//! - Access and refresh token signing and verification (`TokenCodec`)
//! - Session issuance, single-use rotation and revocation (`TokenService`)
//! - Background cleanup of expired refresh tokens

mod cleanup;
mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
