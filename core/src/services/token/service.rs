//! Session service: token pair issuance, rotation and revocation

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::token::{hash_refresh_token, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Service for issuing, rotating and revoking sessions
///
/// A session is a refresh token record in the repository. Access tokens are
/// never stored; they stay valid until their own expiry even after the
/// session behind them is revoked.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: Arc<R>,
    codec: Arc<TokenCodec>,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token repository
    /// * `config` - Secrets and lifetimes
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a validation error for an inconsistent config
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Result<Self, DomainError> {
        let codec = TokenCodec::new(&config)?;
        Ok(Self::with_codec(repository, Arc::new(codec)))
    }

    /// Creates a token service sharing an existing codec
    pub fn with_codec(repository: Arc<R>, codec: Arc<TokenCodec>) -> Self {
        Self { repository, codec }
    }

    /// The codec used by this service, for request authentication
    pub fn codec(&self) -> Arc<TokenCodec> {
        Arc::clone(&self.codec)
    }

    /// Issues a new session (access + refresh token pair) for a user
    ///
    /// The refresh token's hash is stored before the pair is returned. If the
    /// repository write fails nothing is returned and the minted tokens are
    /// dropped.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The issued pair
    /// * `Err(DomainError)` - Empty identity field, or repository failure
    pub async fn issue_session(
        &self,
        user_id: &str,
        user_type: &str,
        email: &str,
    ) -> Result<TokenPair, DomainError> {
        let access_token = self.codec.issue_access_token(user_id, user_type, email)?;
        let refresh_token = self.codec.issue_refresh_token(user_id, user_type, email)?;

        let token_hash = hash_refresh_token(&refresh_token);
        let expires_at = Utc::now()
            .checked_add_signed(self.codec.refresh_ttl())
            .ok_or(TokenError::TokenGenerationFailed)?;

        self.repository
            .create_refresh_token(user_id, &token_hash, expires_at)
            .await
            .map_err(|e| {
                warn!(user_id, error = %e, "Failed to store refresh token");
                e
            })?;

        debug!(user_id, hash_prefix = &token_hash[..8], "Session issued");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.codec.access_ttl(),
            self.codec.refresh_ttl(),
        ))
    }

    /// Exchanges a refresh token for a new token pair
    ///
    /// The presented token is single-use. Its record is deleted only after
    /// the new pair has been stored, so a failure part-way leaves the old
    /// session usable. A crash between the two steps leaves both refresh
    /// tokens valid until one is used or expires.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The rotated pair
    /// * `Err(TokenError::RefreshTokenNotFound)` - Unknown, forged or already used
    /// * `Err(TokenError::RefreshTokenExpired)` - The record had expired (now purged)
    /// * `Err(TokenError::InvalidRefreshToken)` - Record exists but the token fails verification
    /// * `Err(DomainError::Unavailable)` - Repository failure, safe to retry
    pub async fn rotate_session(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let token_hash = hash_refresh_token(refresh_token);
        let hash_prefix = &token_hash[..8];

        let record = match self.repository.find_by_hash(&token_hash).await? {
            Some(record) => record,
            None => {
                debug!(hash_prefix, "Rotation rejected: no stored refresh token");
                return Err(TokenError::RefreshTokenNotFound.into());
            }
        };

        if record.is_expired() {
            if let Err(e) = self.repository.delete_by_hash(&token_hash).await {
                warn!(hash_prefix, error = %e, "Failed to purge expired refresh token");
            }
            debug!(hash_prefix, user_id = %record.user_id, "Rotation rejected: refresh token expired");
            return Err(TokenError::RefreshTokenExpired.into());
        }

        let claims = match self.codec.verify_refresh_token(refresh_token) {
            Ok(claims) if claims.user_id == record.user_id => claims,
            Ok(claims) => {
                warn!(
                    hash_prefix,
                    record_owner = %record.user_id,
                    token_subject = %claims.user_id,
                    "Rotation rejected: refresh token owner mismatch"
                );
                return Err(TokenError::InvalidRefreshToken.into());
            }
            Err(e) => {
                warn!(hash_prefix, error = %e, "Rotation rejected: stored refresh token failed verification");
                return Err(TokenError::InvalidRefreshToken.into());
            }
        };

        let pair = self
            .issue_session(&claims.user_id, &claims.user_type, &claims.email)
            .await?;

        match self.repository.delete_by_hash(&token_hash).await {
            Ok(true) => {}
            Ok(false) => {
                // Consumed or revoked by someone else since the lookup.
                let new_hash = hash_refresh_token(&pair.refresh_token);
                if let Err(e) = self.repository.delete_by_hash(&new_hash).await {
                    warn!(hash_prefix, error = %e, "Failed to withdraw refresh token from a lost rotation");
                }
                info!(hash_prefix, user_id = %claims.user_id, "Rotation lost to a concurrent consumer");
                return Err(TokenError::RefreshTokenNotFound.into());
            }
            Err(e) => {
                warn!(
                    hash_prefix,
                    user_id = %claims.user_id,
                    error = %e,
                    "Failed to delete rotated refresh token; it stays valid until expiry or revocation"
                );
            }
        }

        info!(user_id = %claims.user_id, "Session rotated");
        Ok(pair)
    }

    /// Revokes every session of a user
    ///
    /// Access tokens already issued are unaffected and expire naturally.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of refresh tokens revoked
    /// * `Err(DomainError)` - Repository failure
    pub async fn revoke_all_sessions(&self, user_id: &str) -> Result<usize, DomainError> {
        let revoked = self.repository.delete_all_for_user(user_id).await?;
        info!(user_id, revoked, "Sessions revoked");
        Ok(revoked)
    }

    /// Removes expired refresh tokens from storage
    ///
    /// Intended for periodic background use, see [`TokenCleanupService`](super::TokenCleanupService).
    pub async fn purge_expired(&self) -> Result<usize, DomainError> {
        self.repository.delete_expired().await
    }
}
