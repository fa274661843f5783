//! SMTP mail delivery using lettre

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, error};
use uuid::Uuid;

use otp_core::services::notification::{MailMessage, MailServiceTrait};
use otp_shared::utils::mask_identity;
use otp_shared::{MailConfig, MailEncryption};

use crate::InfrastructureError;

/// Mail service sending multipart (plain + HTML) messages over SMTP
#[derive(Clone)]
pub struct SmtpMailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailService {
    /// Build the transport from configuration
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let from = Self::sender(config)?;

        let builder = match config.encryption {
            MailEncryption::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| InfrastructureError::Mail(e.to_string()))?,
            MailEncryption::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(|e| InfrastructureError::Mail(e.to_string()))?
            }
            MailEncryption::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            }
        };

        let builder = builder.port(config.port);
        let builder = if config.username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
        };

        Ok(Self {
            mailer: builder.build(),
            from,
        })
    }

    fn sender(config: &MailConfig) -> Result<Mailbox, InfrastructureError> {
        let address: Address = config.from_address.parse().map_err(|e| {
            InfrastructureError::Config(format!(
                "Invalid sender address {:?}: {}",
                config.from_address, e
            ))
        })?;
        Ok(Mailbox::new(config.from_name.clone(), address))
    }

    /// Render `message` into an email with a fresh Message-ID
    ///
    /// Returns the message together with its id.
    pub fn build_message(
        &self,
        to: &str,
        message: &MailMessage,
    ) -> Result<(Message, String), InfrastructureError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid recipient: {}", e)))?;

        let domain = self.from.email.domain().to_string();
        let message_id = format!("<{}@{}>", Uuid::new_v4(), domain);

        let email = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(message.subject.clone())
            .message_id(Some(message_id.clone()))
            .multipart(MultiPart::alternative_plain_html(
                message.text_body(),
                message.html_body(),
            ))
            .map_err(|e| InfrastructureError::Mail(e.to_string()))?;

        Ok((email, message_id))
    }
}

#[async_trait]
impl MailServiceTrait for SmtpMailService {
    async fn send_mail(&self, to: &str, message: &MailMessage) -> Result<String, String> {
        let (email, message_id) = self
            .build_message(to, message)
            .map_err(|e| e.to_string())?;

        match self.mailer.send(email).await {
            Ok(response) => {
                debug!(
                    to = %mask_identity(to),
                    code = %response.code(),
                    message_id = %message_id,
                    "SMTP server accepted message"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(to = %mask_identity(to), error = %e, "SMTP delivery failed");
                Err(format!("SMTP delivery failed: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_core::services::notification::OtpMessage;

    fn config() -> MailConfig {
        MailConfig {
            enabled: true,
            host: "localhost".to_string(),
            port: 1025,
            encryption: MailEncryption::None,
            from_name: Some("Acme".to_string()),
            from_address: "no-reply@acme.test".to_string(),
            ..MailConfig::default()
        }
    }

    #[tokio::test]
    async fn test_build_message() {
        let service = SmtpMailService::new(&config()).unwrap();
        let mail = OtpMessage::new("Acme", "482913", 10).to_mail();

        let (email, message_id) = service.build_message("user@example.com", &mail).unwrap();
        assert!(message_id.ends_with("@acme.test>"));

        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("Subject: 482913 is your Acme verification code"));
        assert!(raw.contains("To: user@example.com"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/html"));
    }

    #[tokio::test]
    async fn test_invalid_recipient() {
        let service = SmtpMailService::new(&config()).unwrap();
        let mail = OtpMessage::new("Acme", "482913", 10).to_mail();

        assert!(matches!(
            service.build_message("not-an-address", &mail),
            Err(InfrastructureError::Mail(_))
        ));
    }

    #[test]
    fn test_invalid_sender() {
        let config = MailConfig {
            from_address: "nobody".to_string(),
            ..config()
        };
        assert!(matches!(
            SmtpMailService::new(&config),
            Err(InfrastructureError::Config(_))
        ));
    }
}
