//! Mock repository for exercising store failures

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::OtpRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpRepository;

// Repository whose every operation fails
pub struct FailingOtpRepository;

fn unavailable() -> DomainError {
    DomainError::Storage {
        message: "database unavailable".to_string(),
    }
}

#[async_trait]
impl OtpRepository for FailingOtpRepository {
    async fn find_by_identity(&self, _identity: &str) -> DomainResult<Option<OtpRecord>> {
        Err(unavailable())
    }

    async fn replace(&self, _record: OtpRecord) -> DomainResult<OtpRecord> {
        Err(unavailable())
    }

    async fn consume(&self, _identity: &str, _token: &str, _now: DateTime<Utc>) -> DomainResult<bool> {
        Err(unavailable())
    }

    async fn upsert(&self, _record: &OtpRecord) -> DomainResult<()> {
        Err(unavailable())
    }

    async fn delete_by_identity(&self, _identity: &str) -> DomainResult<u64> {
        Err(unavailable())
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> DomainResult<u64> {
        Err(unavailable())
    }
}
