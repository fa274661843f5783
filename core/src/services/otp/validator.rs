//! Code validation

use chrono::Utc;
use otp_shared::utils::mask_identity;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::{hash_code, CODE_LENGTH};
use crate::errors::DomainResult;
use crate::repositories::OtpRepository;

/// Checks submitted codes and consumes them on success
pub struct OtpValidator<R: OtpRepository> {
    repository: Arc<R>,
}

impl<R: OtpRepository> OtpValidator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate `code` for `identity`
    ///
    /// # Returns
    /// * `Ok(true)` - A live matching code existed and has been deleted
    /// * `Ok(false)` - Wrong code, unknown identity or expired code; the
    ///   store is left untouched
    /// * `Err(DomainError::Storage)` - The store could not be reached
    pub async fn validate(&self, identity: &str, code: &str) -> DomainResult<bool> {
        if !is_well_formed(code) {
            debug!(
                identity = %mask_identity(identity),
                event = "otp_malformed",
                "Rejected malformed code"
            );
            return Ok(false);
        }

        let token = hash_code(identity, code);
        let consumed = self
            .repository
            .consume(identity, &token, Utc::now())
            .await?;

        if consumed {
            info!(identity = %mask_identity(identity), event = "otp_verified", "Code verified");
        } else {
            info!(identity = %mask_identity(identity), event = "otp_rejected", "Code rejected");
        }

        Ok(consumed)
    }
}

fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}
