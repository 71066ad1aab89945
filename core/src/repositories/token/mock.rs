//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing
///
/// Each operation can be switched to fail with `DomainError::Unavailable`.
#[derive(Default)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
    pub fail_create: AtomicBool,
    pub fail_find: AtomicBool,
    pub fail_delete: AtomicBool,
    pub delete_calls: AtomicUsize,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, bypassing the failure switches
    pub async fn insert(&self, record: RefreshTokenRecord) {
        self.tokens
            .write()
            .await
            .insert(record.token_hash.clone(), record);
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn contains(&self, token_hash: &str) -> bool {
        self.tokens.read().await.contains_key(token_hash)
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<(), DomainError> {
        if flag.load(Ordering::SeqCst) {
            Err(DomainError::unavailable(format!("mock {} failure", op)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create_refresh_token(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, DomainError> {
        Self::check(&self.fail_create, "create")?;
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(token_hash) {
            return Err(DomainError::Conflict {
                message: "Token already exists".to_string(),
            });
        }

        let record = RefreshTokenRecord::new(user_id, token_hash, expires_at);
        tokens.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        Self::check(&self.fail_find, "find")?;
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, DomainError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_delete, "delete")?;
        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(token_hash).is_some())
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize, DomainError> {
        Self::check(&self.fail_delete, "delete")?;
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, record| record.user_id != user_id);
        Ok(before - tokens.len())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        Self::check(&self.fail_delete, "delete")?;
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, record| !record.is_expired());
        Ok(before - tokens.len())
    }
}
