//! Mail and SMS transport configuration

use serde::{Deserialize, Serialize};

/// SMTP mail transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MailConfig {
    /// Whether mail delivery is configured at all
    pub enabled: bool,
    /// SMTP relay host
    pub host: String,
    /// SMTP port (STARTTLS/submission by default)
    pub port: u16,
    /// Transport security
    pub encryption: MailEncryption,
    /// SMTP username
    pub username: String,
    /// SMTP password
    pub password: String,
    /// Sender address
    pub from_address: String,
    /// Sender display name
    pub from_name: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::from("localhost"),
            port: 587,
            encryption: MailEncryption::Starttls,
            username: String::new(),
            password: String::new(),
            from_address: String::from("no-reply@localhost"),
            from_name: None,
        }
    }
}

/// SMTP transport security
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailEncryption {
    /// Upgrade a plain connection with STARTTLS
    Starttls,
    /// Implicit TLS (usually port 465)
    Tls,
    /// Plain text, for local catch-all servers only
    None,
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmsConfig {
    /// SMS service provider ("log" writes messages to the log)
    pub provider: String,
    /// From phone number
    pub from_number: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("log"),
            from_number: String::from("+1234567890"),
        }
    }
}
