//! OTP facade: generate, deliver and verify

use std::sync::Arc;

use otp_shared::email;

use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpRepository;
use crate::services::notification::{IdentityRecipient, Notifiable, OtpNotifier};

use super::config::OtpServiceConfig;
use super::generator::OtpGenerator;
use super::types::SendOtpResult;
use super::validator::OtpValidator;

/// Entry point combining generation, delivery and validation
pub struct OtpService<R: OtpRepository> {
    generator: OtpGenerator<R>,
    validator: OtpValidator<R>,
    notifier: OtpNotifier,
    config: OtpServiceConfig,
}

impl<R: OtpRepository> OtpService<R> {
    pub fn new(repository: Arc<R>, config: OtpServiceConfig, notifier: OtpNotifier) -> Self {
        Self {
            generator: OtpGenerator::new(repository.clone(), config.clone()),
            validator: OtpValidator::new(repository),
            notifier,
            config,
        }
    }

    pub fn generator(&self) -> &OtpGenerator<R> {
        &self.generator
    }

    pub fn validator(&self) -> &OtpValidator<R> {
        &self.validator
    }

    /// Generate a code for `identity` and deliver it to `recipient`
    ///
    /// The code stays stored when delivery fails; a later `send` replaces it.
    pub async fn send(
        &self,
        identity: &str,
        recipient: &dyn Notifiable,
    ) -> DomainResult<SendOtpResult> {
        let issued = self.generator.generate(identity).await?;
        let report = self.notifier.notify(recipient, &issued).await?;
        Ok(SendOtpResult { issued, report })
    }

    /// Generate and deliver a code, routing by the identity itself
    ///
    /// Phone identities are stored in E.164 form, so verify with the same form
    /// (see [`OtpService::normalize_identity`]). Addresses at a disposable
    /// provider are rejected before anything is stored.
    pub async fn send_to_identity(&self, identity: &str) -> DomainResult<SendOtpResult> {
        let recipient = IdentityRecipient::parse(identity, &self.config.phone_locale)?;
        if let IdentityRecipient::Email(address) = &recipient {
            self.check_email_provider(address)?;
        }
        let key = Self::identity_key(&recipient);
        self.send(&key, &recipient).await
    }

    /// Canonical storage key for an identity (trimmed email or E.164 number)
    pub fn normalize_identity(&self, identity: &str) -> DomainResult<String> {
        let recipient = IdentityRecipient::parse(identity, &self.config.phone_locale)?;
        Ok(Self::identity_key(&recipient))
    }

    /// Reject email identities whose provider is on the disposable denylist
    ///
    /// Anything that is not an email address passes.
    pub fn check_email_provider(&self, identity: &str) -> DomainResult<()> {
        let identity = identity.trim();
        if email::is_email(identity)
            && !email::validate_email(identity, &self.config.disposable_email_providers)
        {
            return Err(DomainError::Validation {
                message: format!(
                    "Email provider {} is not allowed",
                    email::get_email_provider(identity)
                ),
            });
        }
        Ok(())
    }

    /// Validate and consume a code
    pub async fn verify(&self, identity: &str, code: &str) -> DomainResult<bool> {
        self.validator.validate(identity, code).await
    }

    fn identity_key(recipient: &IdentityRecipient) -> String {
        match recipient {
            IdentityRecipient::Email(address) => address.clone(),
            IdentityRecipient::Phone(number) => number.clone(),
        }
    }
}
