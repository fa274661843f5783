//! Configuration module with sub-modules per concern
//!
//! - `database` - Database connection and pool configuration
//! - `delivery` - Mail and SMS transport configuration
//! - `logging` - Log level and output format
//! - `otp` - OTP lifecycle settings (table, expiry, channels, locale, denylist)

pub mod database;
pub mod delivery;
pub mod logging;
pub mod otp;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use delivery::{MailConfig, MailEncryption, SmsConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use otp::{OtpConfig, PruneConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database configuration
    pub database: DatabaseConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// Scheduled pruning configuration
    pub prune: PruneConfig,

    /// Mail transport configuration
    pub mail: MailConfig,

    /// SMS transport configuration
    pub sms: SmsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes_from_empty_document() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.otp.table, "otp_verifications");
        assert_eq!(config.otp.expires_minutes, 10);
        assert!(config.prune.enabled);
        assert_eq!(config.sms.provider, "log");
    }

    #[test]
    fn test_sections_override_independently() {
        let config: AppConfig = serde_json::from_str(
            r#"{"database": {"max_connections": 50}, "mail": {"encryption": "tls", "port": 465}}"#,
        )
        .unwrap();
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.database.connect_timeout, 30);
        assert_eq!(config.mail.encryption, MailEncryption::Tls);
        assert_eq!(config.mail.port, 465);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }
}
