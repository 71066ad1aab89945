//! Unit tests for the token cleanup service

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::{Duration, Utc};

use super::test_config;
use crate::domain::entities::token::RefreshTokenRecord;
use crate::repositories::MockTokenRepository;
use crate::services::token::{TokenCleanupConfig, TokenCleanupService, TokenService};

async fn setup(
    config: TokenCleanupConfig,
) -> (Arc<TokenCleanupService<MockTokenRepository>>, Arc<MockTokenRepository>) {
    let repo = Arc::new(MockTokenRepository::new());
    let tokens = Arc::new(TokenService::new(Arc::clone(&repo), test_config()).unwrap());

    repo.insert(RefreshTokenRecord::new("u1", "expired-1", Utc::now() - Duration::hours(1)))
        .await;
    repo.insert(RefreshTokenRecord::new("u2", "expired-2", Utc::now() - Duration::days(1)))
        .await;
    repo.insert(RefreshTokenRecord::new("u1", "live", Utc::now() + Duration::days(1)))
        .await;

    (Arc::new(TokenCleanupService::new(tokens, config)), repo)
}

#[test]
fn test_cleanup_config_default() {
    let config = TokenCleanupConfig::default();
    assert_eq!(config.interval_seconds, 3600);
    assert!(config.enabled);
}

#[tokio::test]
async fn test_run_cleanup_removes_only_expired() {
    let (cleanup, repo) = setup(TokenCleanupConfig::default()).await;

    let result = cleanup.run_cleanup().await.unwrap();
    assert_eq!(result.expired_tokens_deleted, 2);
    assert_eq!(repo.len().await, 1);
    assert!(repo.contains("live").await);

    let again = cleanup.run_cleanup().await.unwrap();
    assert_eq!(again.expired_tokens_deleted, 0);
}

#[tokio::test]
async fn test_disabled_cleanup_does_nothing() {
    let config = TokenCleanupConfig {
        enabled: false,
        ..Default::default()
    };
    let (cleanup, repo) = setup(config).await;

    let result = cleanup.run_cleanup().await.unwrap();
    assert_eq!(result.expired_tokens_deleted, 0);
    assert_eq!(repo.len().await, 3);
    assert!(cleanup.start_background_task().is_none());
}

#[tokio::test]
async fn test_run_cleanup_store_failure() {
    let (cleanup, repo) = setup(TokenCleanupConfig::default()).await;
    repo.fail_delete.store(true, Ordering::SeqCst);

    let err = cleanup.run_cleanup().await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(repo.len().await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_background_task_runs_immediately_and_on_interval() {
    let config = TokenCleanupConfig {
        interval_seconds: 60,
        enabled: true,
    };
    let (cleanup, repo) = setup(config).await;

    let handle = cleanup.start_background_task().expect("cleanup enabled");

    // First tick fires immediately.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    assert_eq!(repo.len().await, 1);

    repo.insert(RefreshTokenRecord::new("u3", "expired-3", Utc::now() - Duration::minutes(5)))
        .await;
    tokio::time::sleep(std::time::Duration::from_secs(61)).await;
    assert_eq!(repo.len().await, 1);
    assert!(repo.contains("live").await);

    handle.abort();
}
