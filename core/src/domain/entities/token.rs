//! Token value object with a sliding expiry window.
//!
//! A `Token` is a view over an [`OtpRecord`] that tracks its lifetime as a
//! number of seconds counted from `created_at`, so it can be extended,
//! refreshed or invalidated in place.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::otp_record::{hash_code, OtpRecord};

/// Token bound to an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Email address or phone number the token belongs to
    pub identity: String,

    /// Digest of the code
    pub token: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Lifetime in seconds, counted from `created_at`
    pub expiry_seconds: i64,
}

/// Attributes a token can be looked up by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenAttributes {
    pub identity: Option<String>,
    pub token: Option<String>,
}

impl Token {
    /// Create a token for a plaintext code
    pub fn new(identity: &str, code: &str, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            identity: identity.to_string(),
            token: hash_code(identity, code),
            created_at: now,
            updated_at: now,
            expiry_seconds,
        }
    }

    /// Build a token from a stored record
    pub fn from_record(record: &OtpRecord) -> Self {
        Self {
            identity: record.identity.clone(),
            token: record.token.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            expiry_seconds: (record.expires_at - record.created_at).num_seconds(),
        }
    }

    /// Convert back into a record with a fresh id
    ///
    /// Stores key tokens by `(identity, token)`, so the id only matters when
    /// the row does not exist yet.
    pub fn to_record(&self) -> OtpRecord {
        OtpRecord {
            id: Uuid::new_v4(),
            identity: self.identity.clone(),
            token: self.token.clone(),
            expires_at: self.expires_at(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// `created_at + expiry_seconds`, or `None` outside the timestamp range
    pub fn expiry_for(created_at: DateTime<Utc>, expiry_seconds: i64) -> Option<DateTime<Utc>> {
        Duration::try_seconds(expiry_seconds).and_then(|ttl| created_at.checked_add_signed(ttl))
    }

    /// Absolute expiry, clamped to the representable range
    pub fn expires_at(&self) -> DateTime<Utc> {
        Self::expiry_for(self.created_at, self.expiry_seconds).unwrap_or(
            if self.expiry_seconds < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            },
        )
    }

    /// Whole seconds left before expiry at `now`; negative once expired
    pub fn time_left_at(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at() - now).num_seconds()
    }

    pub fn time_left(&self) -> i64 {
        self.time_left_at(Utc::now())
    }

    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        self.time_left_at(now) <= 0
    }

    pub fn expired(&self) -> bool {
        self.expired_at(Utc::now())
    }
}
