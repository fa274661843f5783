//! Dispatch of rendered codes to transports

use otp_shared::utils::mask_identity;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::{DomainError, DomainResult};
use crate::services::otp::IssuedOtp;

use super::channel::Channel;
use super::config::NotifierConfig;
use super::message::OtpMessage;
use super::recipient::Notifiable;
use super::traits::{MailServiceTrait, SmsServiceTrait};

/// Channels a notification went out on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationReport {
    /// `(channel, message id)` for every successful send
    pub delivered: Vec<(Channel, String)>,
    /// Channels the recipient had no route for
    pub skipped: Vec<Channel>,
}

impl NotificationReport {
    pub fn is_delivered(&self) -> bool {
        !self.delivered.is_empty()
    }
}

/// Delivers issued codes over the configured transports
pub struct OtpNotifier {
    mail: Option<Arc<dyn MailServiceTrait>>,
    sms: Option<Arc<dyn SmsServiceTrait>>,
    config: NotifierConfig,
}

impl OtpNotifier {
    /// Notifier without transports; add them with `with_mail`/`with_sms`
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            mail: None,
            sms: None,
            config,
        }
    }

    pub fn with_mail(mut self, mail: Arc<dyn MailServiceTrait>) -> Self {
        self.mail = Some(mail);
        self
    }

    pub fn with_sms(mut self, sms: Arc<dyn SmsServiceTrait>) -> Self {
        self.sms = Some(sms);
        self
    }

    /// Channels for `recipient`: its own list if non-empty, else the default
    pub fn channels_for(&self, recipient: &dyn Notifiable) -> Vec<Channel> {
        let channels = recipient.otp_channels();
        if channels.is_empty() {
            self.config.default_channels.clone()
        } else {
            channels
        }
    }

    /// Deliver `issued` to `recipient` on every resolved channel
    ///
    /// A channel without a route is skipped. A channel without a transport,
    /// or a failed send, aborts with `DomainError::Delivery`.
    pub async fn notify(
        &self,
        recipient: &dyn Notifiable,
        issued: &IssuedOtp,
    ) -> DomainResult<NotificationReport> {
        let message = OtpMessage::new(
            self.config.app_name.clone(),
            issued.code.clone(),
            issued.expires_in_minutes(),
        );
        let mut report = NotificationReport::default();

        for channel in self.channels_for(recipient) {
            let Some(route) = recipient.route_for(channel) else {
                warn!(
                    channel = %channel,
                    identity = %mask_identity(&issued.record.identity),
                    "Recipient has no route for channel, skipping"
                );
                report.skipped.push(channel);
                continue;
            };

            let message_id = self.send(channel, &route, &message).await.map_err(|e| {
                error!(
                    channel = %channel,
                    to = %mask_identity(&route),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver code"
                );
                e
            })?;

            info!(
                channel = %channel,
                to = %mask_identity(&route),
                message_id = %message_id,
                event = "otp_delivered",
                "Delivered code"
            );
            report.delivered.push((channel, message_id));
        }

        Ok(report)
    }

    async fn send(&self, channel: Channel, route: &str, message: &OtpMessage) -> DomainResult<String> {
        let delivery_error = |message: String| DomainError::Delivery {
            channel: channel.to_string(),
            message,
        };

        match channel {
            Channel::Mail => {
                let mail = self
                    .mail
                    .as_ref()
                    .ok_or_else(|| delivery_error("no mail transport configured".to_string()))?;
                mail.send_mail(route, &message.to_mail())
                    .await
                    .map_err(delivery_error)
            }
            Channel::Sms => {
                let sms = self
                    .sms
                    .as_ref()
                    .ok_or_else(|| delivery_error("no SMS transport configured".to_string()))?;
                sms.send_sms(route, &message.to_sms())
                    .await
                    .map_err(delivery_error)
            }
        }
    }
}
