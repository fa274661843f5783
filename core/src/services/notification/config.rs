//! Notifier configuration

use otp_shared::OtpConfig;

use crate::errors::DomainError;

use super::channel::{parse_channels, Channel};

/// Settings used when rendering and routing notifications
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Channels used when a recipient declares none
    pub default_channels: Vec<Channel>,
    /// Application name rendered in messages
    pub app_name: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            default_channels: vec![Channel::Mail],
            app_name: String::from("OTP"),
        }
    }
}

impl TryFrom<&OtpConfig> for NotifierConfig {
    type Error = DomainError;

    fn try_from(config: &OtpConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            default_channels: parse_channels(&config.default_channels)?,
            app_name: config.app_name.clone(),
        })
    }
}
