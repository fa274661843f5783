//! Code generation

use chrono::{Duration, Utc};
use otp_shared::utils::mask_identity;
use rand::Rng;
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::entities::{OtpRecord, CODE_MAX, CODE_MIN};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpRepository;

use super::config::OtpServiceConfig;
use super::types::IssuedOtp;

/// Issues codes, keeping at most one live code per identity
pub struct OtpGenerator<R: OtpRepository> {
    repository: Arc<R>,
    config: OtpServiceConfig,
}

impl<R: OtpRepository> OtpGenerator<R> {
    pub fn new(repository: Arc<R>, config: OtpServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Generate a code valid for the configured default expiry
    pub async fn generate(&self, identity: &str) -> DomainResult<IssuedOtp> {
        self.generate_with_ttl(identity, self.config.expires_minutes)
            .await
    }

    /// Generate a code valid for `ttl_minutes`
    ///
    /// Any previous code for `identity` is replaced in the same store
    /// operation. A TTL whose expiry cannot be represented is rejected with
    /// `DomainError::Validation` before the store is touched.
    pub async fn generate_with_ttl(
        &self,
        identity: &str,
        ttl_minutes: i64,
    ) -> DomainResult<IssuedOtp> {
        let ttl = Duration::try_minutes(ttl_minutes).ok_or_else(|| DomainError::Validation {
            message: format!("Expiry of {} minutes is out of range", ttl_minutes),
        })?;
        let code = Self::generate_code();
        let record = OtpRecord::new(identity, &code, ttl, Utc::now())?;

        let record = self.repository.replace(record).await.map_err(|e| {
            error!(
                identity = %mask_identity(identity),
                error = %e,
                event = "otp_storage_failed",
                "Failed to store generated code"
            );
            e
        })?;

        info!(
            identity = %mask_identity(identity),
            expires_at = %record.expires_at,
            event = "otp_generated",
            "Generated new code"
        );

        Ok(IssuedOtp { record, code })
    }

    /// Draw a code uniformly from [100000, 999999]
    pub(crate) fn generate_code() -> String {
        let code: u32 = rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }
}
