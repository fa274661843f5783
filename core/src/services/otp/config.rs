//! Configuration for the OTP services

use otp_shared::config::otp::DEFAULT_EXPIRES_MINUTES;
use otp_shared::OtpConfig;

/// Settings shared by the generator, the token service and the facade
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Minutes a generated code stays valid
    pub expires_minutes: i64,
    /// Locale used to resolve phone identities without a country code
    pub phone_locale: String,
    /// Email providers that may not receive codes
    pub disposable_email_providers: Vec<String>,
}

impl OtpServiceConfig {
    /// Default expiry in seconds
    pub fn expires_seconds(&self) -> i64 {
        self.expires_minutes * 60
    }
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            expires_minutes: DEFAULT_EXPIRES_MINUTES,
            phone_locale: String::from("id"),
            disposable_email_providers: Vec::new(),
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            expires_minutes: config.expires_minutes,
            phone_locale: config.phone_locale.clone(),
            disposable_email_providers: config.disposable_email_providers.clone(),
        }
    }
}
