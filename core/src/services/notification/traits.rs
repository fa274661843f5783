//! Traits for mail and SMS transport integration

use async_trait::async_trait;

use super::message::MailMessage;

/// Trait for mail transport integration
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send a rendered message, returning the transport's message id
    async fn send_mail(&self, to: &str, message: &MailMessage) -> Result<String, String>;
}

/// Trait for SMS transport integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send a text message, returning the provider's message id
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String>;
}
