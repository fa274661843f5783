//! Persisted one-time password record.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Length of a generated code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be drawn (no leading zero)
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be drawn
pub const CODE_MAX: u32 = 999_999;

/// Digest stored in place of a plaintext code
///
/// SHA-256 over `identity:code`, hex encoded. Binding the identity keeps two
/// identities holding the same code from sharing a digest.
pub fn hash_code(identity: &str, code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identity.as_bytes());
    hasher.update(b":");
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// A code issued to an identity
///
/// At most one record exists per identity; issuing a new code replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Primary key
    pub id: Uuid,

    /// Email address or phone number the code was issued to
    pub identity: String,

    /// Digest of the code (see [`hash_code`])
    pub token: String,

    /// Absolute expiry; the record is expired once `expires_at <= now`
    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Create a record for `code`, expiring `ttl` after `now`
    ///
    /// Fails with `DomainError::Validation` when the expiry is not a
    /// representable timestamp.
    pub fn new(identity: &str, code: &str, ttl: Duration, now: DateTime<Utc>) -> DomainResult<Self> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| DomainError::Validation {
                message: format!("Expiry of {} seconds is out of range", ttl.num_seconds()),
            })?;

        Ok(Self {
            id: Uuid::new_v4(),
            identity: identity.to_string(),
            token: hash_code(identity, code),
            expires_at,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether the record is expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether the record is expired right now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Compare a stored digest in constant time
    pub fn token_matches(&self, token: &str) -> bool {
        constant_time_eq(self.token.as_bytes(), token.as_bytes())
    }

    /// Whether `code` is the code this record was issued for
    pub fn matches(&self, code: &str) -> bool {
        self.token_matches(&hash_code(&self.identity, code))
    }
}
