//! Unit tests for pruning

use chrono::{Duration, Utc};
use otp_shared::PruneConfig;
use std::sync::Arc;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;
use crate::repositories::{InMemoryOtpRepository, OtpRepository};
use crate::services::otp::OtpPruner;

use super::mocks::FailingOtpRepository;

async fn seed(repo: &InMemoryOtpRepository) {
    let now = Utc::now();
    for (identity, ttl) in [
        ("expired-a@example.com", Duration::minutes(-5)),
        ("expired-b@example.com", Duration::seconds(-1)),
        ("live@example.com", Duration::minutes(5)),
    ] {
        repo.replace(OtpRecord::new(identity, "123456", ttl, now).unwrap())
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_prune_removes_all_and_only_expired() {
    let repo = Arc::new(InMemoryOtpRepository::new());
    seed(&repo).await;
    let pruner = OtpPruner::new(repo.clone(), PruneConfig::default());

    assert_eq!(pruner.prune_expired().await.unwrap(), 2);
    assert_eq!(pruner.prune_expired().await.unwrap(), 0);

    assert_eq!(repo.len().await, 1);
    assert!(repo.find_by_identity("live@example.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_prune_empty_store() {
    let pruner = OtpPruner::new(Arc::new(InMemoryOtpRepository::new()), PruneConfig::default());
    assert_eq!(pruner.prune_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn test_prune_failure() {
    let pruner = OtpPruner::new(Arc::new(FailingOtpRepository), PruneConfig::default());

    assert!(matches!(
        pruner.prune_expired().await,
        Err(DomainError::Storage { .. })
    ));

    let result = pruner.run_cycle().await;
    assert!(!result.is_success());
    assert_eq!(result.deleted, 0);
}

#[tokio::test]
async fn test_disabled_background_task_does_not_start() {
    let config = PruneConfig {
        interval_seconds: 1,
        enabled: false,
    };
    let pruner = Arc::new(OtpPruner::new(Arc::new(InMemoryOtpRepository::new()), config));

    assert!(pruner.start_background_task().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_background_task_prunes_on_interval() {
    let repo = Arc::new(InMemoryOtpRepository::new());
    seed(&repo).await;

    let config = PruneConfig {
        interval_seconds: 60,
        enabled: true,
    };
    let pruner = Arc::new(OtpPruner::new(repo.clone(), config));
    let handle = pruner.start_background_task().expect("pruner should start");

    // The first tick fires immediately
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    assert_eq!(repo.len().await, 1);

    // Records expiring later are picked up by a following tick
    repo.replace(OtpRecord::new(
        "late@example.com",
        "123456",
        Duration::seconds(-1),
        Utc::now(),
    )
    .unwrap())
    .await
    .unwrap();
    tokio::time::sleep(std::time::Duration::from_secs(61)).await;
    assert_eq!(repo.len().await, 1);

    handle.abort();
}
