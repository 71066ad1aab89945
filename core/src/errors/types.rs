//! Token-related error types
//!
//! Variants stay distinguishable for logging. The presentation layer
//! collapses every credential failure into one unauthorized response.

use thiserror::Error;

/// Token issuance, verification and rotation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// An identity field was empty at issuance
    #[error("Missing identity field: {field}")]
    MissingIdentity { field: &'static str },

    /// The token string is not a well-formed signed token
    #[error("Invalid token format")]
    InvalidTokenFormat,

    /// The signature does not match the key for this token kind
    #[error("Invalid signature")]
    InvalidSignature,

    /// The embedded expiry has passed
    #[error("Token expired")]
    TokenExpired,

    /// No stored record for the presented refresh token
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    /// The stored record for the presented refresh token has expired
    #[error("Refresh token expired")]
    RefreshTokenExpired,

    /// A stored refresh token failed cryptographic verification
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable code for logs and telemetry, never sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MissingIdentity { .. } => "MISSING_IDENTITY",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::RefreshTokenNotFound => "REFRESH_TOKEN_NOT_FOUND",
            TokenError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }

    /// Whether this error is a rejected credential rather than a caller or server fault
    pub fn is_credential_failure(&self) -> bool {
        !matches!(
            self,
            TokenError::MissingIdentity { .. } | TokenError::TokenGenerationFailed
        )
    }
}
