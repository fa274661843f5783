//! In-memory implementation of OtpRepository
//!
//! Used by the test suites and by embedders that do not need durability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainResult;

use super::r#trait::OtpRepository;

/// Repository keeping records in a map keyed by identity
#[derive(Clone)]
pub struct InMemoryOtpRepository {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl InMemoryOtpRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn find_by_identity(&self, identity: &str) -> DomainResult<Option<OtpRecord>> {
        let records = self.records.read().await;
        Ok(records.get(identity).cloned())
    }

    async fn replace(&self, record: OtpRecord) -> DomainResult<OtpRecord> {
        let mut records = self.records.write().await;
        records.insert(record.identity.clone(), record.clone());
        Ok(record)
    }

    async fn consume(&self, identity: &str, token: &str, now: DateTime<Utc>) -> DomainResult<bool> {
        let mut records = self.records.write().await;

        let live_match = records
            .get(identity)
            .map(|record| record.token_matches(token) && !record.is_expired_at(now))
            .unwrap_or(false);

        if live_match {
            records.remove(identity);
        }

        Ok(live_match)
    }

    async fn upsert(&self, record: &OtpRecord) -> DomainResult<()> {
        let mut records = self.records.write().await;

        match records.get_mut(&record.identity) {
            Some(existing) if existing.token_matches(&record.token) => {
                existing.expires_at = record.expires_at;
                existing.created_at = record.created_at;
                existing.updated_at = record.updated_at;
            }
            _ => {
                records.insert(record.identity.clone(), record.clone());
            }
        }

        Ok(())
    }

    async fn delete_by_identity(&self, identity: &str) -> DomainResult<u64> {
        let mut records = self.records.write().await;
        Ok(records.remove(identity).map_or(0, |_| 1))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, record| !record.is_expired_at(now));

        Ok((initial_count - records.len()) as u64)
    }
}
