//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Repository trait for refresh token records
///
/// Every operation is keyed by the hex SHA-256 hash of the refresh token
/// string, never the raw token. The repository only answers "does this hash
/// exist, and until when"; claims are re-derived from the signed token.
///
/// # Consistency
/// Implementations must make `create_refresh_token` and `delete_by_hash`
/// atomic. `delete_by_hash` reporting whether it removed a record is what
/// makes rotation single-use under concurrent callers.
///
/// # Errors
/// - `DomainError::Conflict` - a record with the same hash already exists
/// - `DomainError::Unavailable` - the backing store failed
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Create a new refresh token record
    ///
    /// # Arguments
    /// * `user_id` - Owner of the token
    /// * `token_hash` - Hex SHA-256 of the refresh token
    /// * `expires_at` - When the record stops being usable
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The stored record
    /// * `Err(DomainError)` - Duplicate hash or store failure
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use fl_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let expires_at = Utc::now() + Duration::days(7);
    /// let record = repo.create_refresh_token("user-1", "5e884898da28...", expires_at).await?;
    /// println!("Record {} created", record.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn create_refresh_token(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a refresh token record by its hash
    ///
    /// # Returns
    /// * `Ok(Some(RefreshTokenRecord))` - Record found (expired or not)
    /// * `Ok(None)` - No record with the given hash
    /// * `Err(DomainError)` - Store failure
    async fn find_by_hash(&self, token_hash: &str)
        -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Delete a record by hash
    ///
    /// Idempotent: deleting a missing hash is not an error.
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed the record
    /// * `Ok(false)` - No record existed
    /// * `Err(DomainError)` - Store failure
    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Delete every record owned by a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records removed
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize, DomainError>;

    /// Delete every record whose expiry has passed
    ///
    /// Maintenance sweep, called out-of-band rather than on the request path.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records removed
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
