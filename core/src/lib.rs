//! # Fitline Core
//!
//! Session and token lifecycle for the Fitline backend.
//! This crate contains the token entities, the token codec and session
//! service, the refresh token repository contract, and the error types the
//! presentation layer maps to responses.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
