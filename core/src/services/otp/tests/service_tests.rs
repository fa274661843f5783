//! Unit tests for the OTP facade

use std::sync::Arc;

use crate::errors::DomainError;
use crate::repositories::{InMemoryOtpRepository, OtpRepository};
use crate::services::notification::tests::mocks::{MockMailService, MockSmsService};
use crate::services::notification::{Channel, Notifiable, NotifierConfig, OtpNotifier};
use crate::services::otp::{OtpService, OtpServiceConfig};

struct Customer {
    email: String,
}

impl Notifiable for Customer {
    fn route_for(&self, channel: Channel) -> Option<String> {
        match channel {
            Channel::Mail => Some(self.email.clone()),
            Channel::Sms => None,
        }
    }
}

fn service(
    repo: Arc<InMemoryOtpRepository>,
    mail: Arc<MockMailService>,
    sms: Arc<MockSmsService>,
) -> OtpService<InMemoryOtpRepository> {
    let notifier = OtpNotifier::new(NotifierConfig::default())
        .with_mail(mail)
        .with_sms(sms);
    OtpService::new(repo, OtpServiceConfig::default(), notifier)
}

#[tokio::test]
async fn test_send_and_verify() {
    let repo = Arc::new(InMemoryOtpRepository::new());
    let mail = Arc::new(MockMailService::new(false));
    let sms = Arc::new(MockSmsService::new(false));
    let service = service(repo.clone(), mail.clone(), sms.clone());

    let customer = Customer {
        email: "user@example.com".to_string(),
    };
    let result = service.send("user@example.com", &customer).await.unwrap();

    assert_eq!(result.report.delivered.len(), 1);
    assert_eq!(result.report.delivered[0].0, Channel::Mail);
    assert!(result.report.delivered[0].1.starts_with("mock-mail-"));

    let (to, message) = mail.last_message().unwrap();
    assert_eq!(to, "user@example.com");
    assert_eq!(message.code, result.issued.code);
    assert_eq!(sms.sent_count(), 0);

    assert!(service.verify("user@example.com", &result.issued.code).await.unwrap());
    assert!(!service.verify("user@example.com", &result.issued.code).await.unwrap());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_send_to_phone_identity_uses_sms() {
    let repo = Arc::new(InMemoryOtpRepository::new());
    let mail = Arc::new(MockMailService::new(false));
    let sms = Arc::new(MockSmsService::new(false));
    let service = service(repo.clone(), mail.clone(), sms.clone());

    let result = service.send_to_identity("0812-3456-789").await.unwrap();

    assert_eq!(result.issued.record.identity, "+628123456789");
    assert_eq!(mail.sent_count(), 0);
    let (phone, text) = sms.last_message().unwrap();
    assert_eq!(phone, "+628123456789");
    assert!(text.contains(&result.issued.code));

    let key = service.normalize_identity("0812-3456-789").unwrap();
    assert!(service.verify(&key, &result.issued.code).await.unwrap());
}

#[tokio::test]
async fn test_send_to_email_identity_uses_mail() {
    let repo = Arc::new(InMemoryOtpRepository::new());
    let mail = Arc::new(MockMailService::new(false));
    let sms = Arc::new(MockSmsService::new(false));
    let service = service(repo.clone(), mail.clone(), sms.clone());

    let result = service.send_to_identity("user@example.com").await.unwrap();

    assert_eq!(result.issued.record.identity, "user@example.com");
    assert_eq!(mail.sent_count(), 1);
    assert_eq!(sms.sent_count(), 0);
}

#[tokio::test]
async fn test_send_to_unusable_identity_stores_nothing() {
    let repo = Arc::new(InMemoryOtpRepository::new());
    let service = service(
        repo.clone(),
        Arc::new(MockMailService::new(false)),
        Arc::new(MockSmsService::new(false)),
    );

    assert!(service.send_to_identity("definitely not valid").await.is_err());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_delivery_failure_keeps_generated_code() {
    let repo = Arc::new(InMemoryOtpRepository::new());
    let service = service(
        repo.clone(),
        Arc::new(MockMailService::new(true)),
        Arc::new(MockSmsService::new(false)),
    );

    let customer = Customer {
        email: "user@example.com".to_string(),
    };
    let result = service.send("user@example.com", &customer).await;

    assert!(matches!(result, Err(DomainError::Delivery { .. })));
    assert!(repo.find_by_identity("user@example.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_disposable_email_provider_is_rejected() {
    let repo = Arc::new(InMemoryOtpRepository::new());
    let mail = Arc::new(MockMailService::new(false));
    let config = OtpServiceConfig {
        disposable_email_providers: vec!["yopmail.com".to_string(), "mailinator.com".to_string()],
        ..OtpServiceConfig::default()
    };
    let notifier = OtpNotifier::new(NotifierConfig::default()).with_mail(mail.clone());
    let service = OtpService::new(repo.clone(), config, notifier);

    let result = service.send_to_identity("x@yopmail.com").await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert!(matches!(
        service.check_email_provider(" X@MAILINATOR.COM "),
        Err(DomainError::Validation { .. })
    ));
    assert!(repo.is_empty().await);
    assert!(mail.last_message().is_none());

    assert!(service.check_email_provider("user@example.com").is_ok());
    assert!(service.check_email_provider("+628123456789").is_ok());
    service.send_to_identity("user@example.com").await.unwrap();
    assert_eq!(repo.len().await, 1);
}
