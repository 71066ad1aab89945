//! In-process refresh token store
//!
//! Used when no `DATABASE_URL` is configured and by the API tests. Records
//! live only as long as the process; every operation takes a single lock, so
//! create and delete are atomic with respect to each other.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use fl_core::domain::entities::token::RefreshTokenRecord;
use fl_core::errors::DomainError;
use fl_core::repositories::TokenRepository;

/// In-memory implementation of TokenRepository, keyed by token hash
#[derive(Default)]
pub struct InMemoryTokenRepository {
    records: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn create_refresh_token(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(token_hash) {
            return Err(DomainError::Conflict {
                message: "Token already exists".to_string(),
            });
        }

        let record = RefreshTokenRecord::new(user_id, token_hash, expires_at);
        records.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        Ok(self.records.read().await.get(token_hash).cloned())
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, DomainError> {
        Ok(self.records.write().await.remove(token_hash).is_some())
    }

    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.user_id != user_id);
        Ok(before - records.len())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let now = Utc::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.expires_at >= now);
        let deleted = before - records.len();
        if deleted > 0 {
            tracing::debug!(deleted, "Deleted expired refresh tokens");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    fn in_a_day() -> DateTime<Utc> {
        Utc::now() + Duration::days(1)
    }

    #[tokio::test]
    async fn test_create_find_delete() {
        let repo = InMemoryTokenRepository::new();
        let created = repo
            .create_refresh_token("user-1", "hash-1", in_a_day())
            .await
            .unwrap();

        let found = repo.find_by_hash("hash-1").await.unwrap().unwrap();
        assert_eq!(found, created);

        assert!(repo.delete_by_hash("hash-1").await.unwrap());
        assert!(!repo.delete_by_hash("hash-1").await.unwrap());
        assert!(repo.find_by_hash("hash-1").await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_hash_conflicts() {
        let repo = InMemoryTokenRepository::new();
        repo.create_refresh_token("user-1", "hash-1", in_a_day())
            .await
            .unwrap();

        let err = repo
            .create_refresh_token("user-2", "hash-1", in_a_day())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));

        let kept = repo.find_by_hash("hash-1").await.unwrap().unwrap();
        assert_eq!(kept.user_id, "user-1");
    }

    #[tokio::test]
    async fn test_delete_all_for_user() {
        let repo = InMemoryTokenRepository::new();
        repo.create_refresh_token("user-1", "a", in_a_day()).await.unwrap();
        repo.create_refresh_token("user-1", "b", in_a_day()).await.unwrap();
        repo.create_refresh_token("user-2", "c", in_a_day()).await.unwrap();

        assert_eq!(repo.delete_all_for_user("user-1").await.unwrap(), 2);
        assert_eq!(repo.delete_all_for_user("user-1").await.unwrap(), 0);
        assert!(repo.find_by_hash("c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_expired_keeps_live_records() {
        let repo = InMemoryTokenRepository::new();
        repo.create_refresh_token("user-1", "old", Utc::now() - Duration::seconds(1))
            .await
            .unwrap();
        repo.create_refresh_token("user-1", "new", in_a_day()).await.unwrap();

        assert_eq!(repo.delete_expired().await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);
        assert!(repo.find_by_hash("new").await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_deletes_have_one_winner() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        repo.create_refresh_token("user-1", "contested", in_a_day())
            .await
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.delete_by_hash("contested").await.unwrap() })
            })
            .collect();

        let mut removed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                removed += 1;
            }
        }
        assert_eq!(removed, 1);
    }
}
