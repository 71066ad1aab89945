//! Domain-specific error types and error handling.

mod types;


pub use types::TokenError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A store write collided with an existing record
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The store could not be reached or failed mid-operation
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for store I/O failures
    pub fn unavailable(message: impl Into<String>) -> Self {
        DomainError::Unavailable {
            message: message.into(),
        }
    }

    /// Verification and rotation failures, reported to clients as one outcome
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, DomainError::Token(err) if err.is_credential_failure())
    }

    /// Only store unavailability is safe to retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Unavailable { .. })
    }
}
