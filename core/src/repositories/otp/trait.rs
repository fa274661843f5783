//! Repository trait for OTP record persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{OtpRecord, TokenAttributes};
use crate::errors::{DomainError, DomainResult};

/// Repository trait for [`OtpRecord`] persistence operations
///
/// Every mutating operation is a single atomic store operation; callers never
/// read and then write.
///
/// # Invariants
/// - At most one record exists per identity
/// - Records hold a digest of the code, never the plaintext
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Find the record issued to an identity, expired or not
    async fn find_by_identity(&self, identity: &str) -> DomainResult<Option<OtpRecord>>;

    /// Store `record`, atomically replacing any record for the same identity
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The stored record
    /// * `Err(DomainError::Storage)` - The write failed
    async fn replace(&self, record: OtpRecord) -> DomainResult<OtpRecord>;

    /// Delete the record matching `identity` and `token` if it is still live
    ///
    /// # Returns
    /// * `Ok(true)` - A live record matched and was deleted
    /// * `Ok(false)` - No live match; nothing was changed
    /// * `Err(DomainError::Storage)` - The delete failed
    ///
    /// Concurrent calls for the same record succeed at most once.
    async fn consume(&self, identity: &str, token: &str, now: DateTime<Utc>) -> DomainResult<bool>;

    /// Update or insert a record keyed by `(identity, token)`
    ///
    /// An existing match has its expiry and timestamps rewritten; otherwise
    /// the record is stored, replacing any other record for the identity.
    async fn upsert(&self, record: &OtpRecord) -> DomainResult<()>;

    /// Delete every record for an identity, returning the number removed
    async fn delete_by_identity(&self, identity: &str) -> DomainResult<u64>;

    /// Delete every record with `expires_at <= now`, returning the number removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64>;

    /// Find a record by arbitrary attributes
    ///
    /// No store supports attribute lookups yet.
    async fn find_by_attributes(
        &self,
        _attributes: &TokenAttributes,
    ) -> DomainResult<Option<OtpRecord>> {
        Err(DomainError::NotImplemented {
            operation: "find_by_attributes".to_string(),
        })
    }
}
