//! Main token service implementation

use chrono::Utc;
use otp_shared::utils::mask_identity;
use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::entities::{Token, TokenAttributes};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpRepository;
use crate::services::otp::{OtpGenerator, OtpServiceConfig};

/// Service for extending, refreshing and invalidating tokens
///
/// Mutating operations leave the caller's `Token` untouched when the store
/// rejects the write.
pub struct TokenService<R: OtpRepository> {
    repository: Arc<R>,
    generator: OtpGenerator<R>,
    config: OtpServiceConfig,
}

impl<R: OtpRepository> TokenService<R> {
    pub fn new(repository: Arc<R>, config: OtpServiceConfig) -> Self {
        Self {
            generator: OtpGenerator::new(repository.clone(), config.clone()),
            repository,
            config,
        }
    }

    /// Issue a new token, returning it with its plaintext code
    ///
    /// `ttl_minutes` defaults to the configured expiry.
    pub async fn issue(
        &self,
        identity: &str,
        ttl_minutes: Option<i64>,
    ) -> DomainResult<(Token, String)> {
        let ttl_minutes = ttl_minutes.unwrap_or(self.config.expires_minutes);
        let issued = self.generator.generate_with_ttl(identity, ttl_minutes).await?;
        Ok((Token::from_record(&issued.record), issued.code))
    }

    /// Expire the token immediately
    pub async fn invalidate(&self, token: &mut Token) -> DomainResult<()> {
        self.persist(token, 0).await
    }

    /// Alias of [`TokenService::invalidate`]
    pub async fn revoke(&self, token: &mut Token) -> DomainResult<()> {
        self.invalidate(token).await
    }

    /// Extend the lifetime by `seconds`, or by the configured default expiry
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - The new expiry is out of range
    /// * `Err(DomainError::Storage)` - The write failed
    pub async fn extend(&self, token: &mut Token, seconds: Option<i64>) -> DomainResult<()> {
        let seconds = seconds.unwrap_or_else(|| self.config.expires_seconds());
        let expiry_seconds = token
            .expiry_seconds
            .checked_add(seconds)
            .filter(|total| Token::expiry_for(token.created_at, *total).is_some())
            .ok_or_else(|| DomainError::Validation {
                message: format!("Cannot extend token by {} seconds", seconds),
            })?;

        self.persist(token, expiry_seconds).await
    }

    /// Extend the lifetime by the whole seconds elapsed since the last update
    pub async fn refresh(&self, token: &mut Token) -> DomainResult<()> {
        let elapsed = (Utc::now() - token.updated_at).num_seconds().abs();
        self.extend(token, Some(elapsed)).await
    }

    /// Look a token up by attributes
    pub async fn retrieve_by_attributes(
        &self,
        attributes: &TokenAttributes,
    ) -> DomainResult<Option<Token>> {
        let record = self.repository.find_by_attributes(attributes).await?;
        Ok(record.as_ref().map(Token::from_record))
    }

    /// Write `token` back with a new lifetime, updating it only on success
    async fn persist(&self, token: &mut Token, expiry_seconds: i64) -> DomainResult<()> {
        let mut updated = token.clone();
        updated.expiry_seconds = expiry_seconds;
        updated.updated_at = Utc::now();

        self.repository
            .upsert(&updated.to_record())
            .await
            .map_err(|e| {
                error!(
                    identity = %mask_identity(&token.identity),
                    error = %e,
                    event = "token_persist_failed",
                    "Failed to save token"
                );
                e.into_storage("failed to save token")
            })?;

        debug!(
            identity = %mask_identity(&updated.identity),
            expiry_seconds = updated.expiry_seconds,
            "Saved token"
        );
        *token = updated;
        Ok(())
    }
}
