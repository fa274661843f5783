//! Unit tests for channel resolution, rendering and delivery

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;
use crate::services::notification::{
    Channel, IdentityRecipient, Notifiable, NotifierConfig, OtpMessage, OtpNotifier,
};
use crate::services::otp::IssuedOtp;

use super::mocks::{MockMailService, MockSmsService};

struct User {
    email: Option<String>,
    phone: Option<String>,
    channels: Vec<Channel>,
}

impl Notifiable for User {
    fn route_for(&self, channel: Channel) -> Option<String> {
        match channel {
            Channel::Mail => self.email.clone(),
            Channel::Sms => self.phone.clone(),
        }
    }

    fn otp_channels(&self) -> Vec<Channel> {
        self.channels.clone()
    }
}

fn issued(identity: &str, code: &str, minutes: i64) -> IssuedOtp {
    IssuedOtp {
        record: OtpRecord::new(identity, code, Duration::minutes(minutes), Utc::now()).unwrap(),
        code: code.to_string(),
    }
}

fn config(channels: Vec<Channel>) -> NotifierConfig {
    NotifierConfig {
        default_channels: channels,
        app_name: "Acme".to_string(),
    }
}

#[test]
fn test_mail_rendering() {
    let mail = OtpMessage::new("Acme", "482913", 15).to_mail();

    assert_eq!(mail.subject, "482913 is your Acme verification code");
    assert_eq!(mail.greeting, "Hello!");
    assert!(mail.text_body().contains("482913"));
    assert!(mail.text_body().contains("15 minutes"));

    let html = mail.html_body();
    assert!(html.contains("font-size: 3rem"));
    assert!(html.contains("text-align: center;\">482913</p>"));
}

#[test]
fn test_mail_html_escapes_app_name() {
    let html = OtpMessage::new("<Acme & Co>", "482913", 15).to_mail().html_body();
    assert!(html.contains("&lt;Acme &amp; Co&gt;"));
    assert!(!html.contains("<Acme"));
}

#[test]
fn test_sms_rendering_is_single_line() {
    let sms = OtpMessage::new("Acme", "482913", 10).to_sms();
    assert_eq!(
        sms,
        "Your Acme one-time password is 482913. It expires in 10 minutes. If you didn't request it, ignore this message."
    );
    assert!(!sms.contains('\n'));
}

#[test]
fn test_channels_fall_back_to_default() {
    let notifier = OtpNotifier::new(config(vec![Channel::Sms, Channel::Mail]));

    let no_preference = User {
        email: None,
        phone: None,
        channels: vec![],
    };
    assert_eq!(
        notifier.channels_for(&no_preference),
        vec![Channel::Sms, Channel::Mail]
    );

    let prefers_mail = User {
        email: None,
        phone: None,
        channels: vec![Channel::Mail],
    };
    assert_eq!(notifier.channels_for(&prefers_mail), vec![Channel::Mail]);
}

#[tokio::test]
async fn test_notify_delivers_on_every_channel() {
    let mail = Arc::new(MockMailService::new(false));
    let sms = Arc::new(MockSmsService::new(false));
    let notifier = OtpNotifier::new(config(vec![Channel::Mail, Channel::Sms]))
        .with_mail(mail.clone())
        .with_sms(sms.clone());

    let user = User {
        email: Some("user@example.com".to_string()),
        phone: Some("+628123456789".to_string()),
        channels: vec![],
    };

    let report = notifier
        .notify(&user, &issued("user@example.com", "123456", 15))
        .await
        .unwrap();

    assert_eq!(report.delivered.len(), 2);
    assert!(report.skipped.is_empty());

    let (to, message) = mail.last_message().unwrap();
    assert_eq!(to, "user@example.com");
    assert_eq!(message.code, "123456");

    let (phone, text) = sms.last_message().unwrap();
    assert_eq!(phone, "+628123456789");
    assert!(text.contains("123456"));
    assert!(text.contains("15 minutes"));
}

#[tokio::test]
async fn test_notify_skips_channels_without_route() {
    let mail = Arc::new(MockMailService::new(false));
    let notifier = OtpNotifier::new(config(vec![Channel::Mail, Channel::Sms])).with_mail(mail.clone());

    let user = User {
        email: Some("user@example.com".to_string()),
        phone: None,
        channels: vec![],
    };

    let report = notifier
        .notify(&user, &issued("user@example.com", "123456", 10))
        .await
        .unwrap();

    assert_eq!(report.delivered.len(), 1);
    assert_eq!(report.skipped, vec![Channel::Sms]);
    assert!(report.is_delivered());
}

#[tokio::test]
async fn test_notify_without_transport_is_delivery_error() {
    let notifier = OtpNotifier::new(config(vec![Channel::Sms]));
    let user = User {
        email: None,
        phone: Some("+628123456789".to_string()),
        channels: vec![],
    };

    let result = notifier
        .notify(&user, &issued("+628123456789", "123456", 10))
        .await;

    match result {
        Err(DomainError::Delivery { channel, .. }) => assert_eq!(channel, "sms"),
        other => panic!("Expected delivery error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_notify_transport_failure_is_delivery_error() {
    let mail = Arc::new(MockMailService::new(true));
    let notifier = OtpNotifier::new(config(vec![Channel::Mail])).with_mail(mail);
    let user = User {
        email: Some("user@example.com".to_string()),
        phone: None,
        channels: vec![],
    };

    let result = notifier
        .notify(&user, &issued("user@example.com", "123456", 10))
        .await;

    match result {
        Err(DomainError::Delivery { channel, message }) => {
            assert_eq!(channel, "mail");
            assert!(message.contains("Mail service error"));
        }
        other => panic!("Expected delivery error, got {:?}", other),
    }
}

#[test]
fn test_identity_recipient_routes() {
    let email = IdentityRecipient::parse(" user@example.com ", "id").unwrap();
    assert_eq!(email.otp_channels(), vec![Channel::Mail]);
    assert_eq!(email.route_for(Channel::Mail), Some("user@example.com".to_string()));
    assert_eq!(email.route_for(Channel::Sms), None);

    let phone = IdentityRecipient::parse("08123456789", "id").unwrap();
    assert_eq!(phone.otp_channels(), vec![Channel::Sms]);
    assert_eq!(phone.route_for(Channel::Sms), Some("+628123456789".to_string()));
    assert_eq!(phone.route_for(Channel::Mail), None);
}

#[test]
fn test_identity_recipient_rejects_unusable_identities() {
    assert!(matches!(
        IdentityRecipient::parse("not an identity", "id"),
        Err(DomainError::InvalidPhoneNumber { .. }) | Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        IdentityRecipient::parse("+6281234567890", "id"),
        Err(DomainError::Validation { .. })
    ));
}
