use crate::sms::{create_sms_service, LogSmsService};
use crate::InfrastructureError;
use otp_core::services::notification::SmsServiceTrait;
use otp_shared::SmsConfig;

const FROM: &str = "+1234567890";

#[tokio::test]
async fn test_send_counts_messages() {
    let service = LogSmsService::new(FROM);

    let id = service
        .send_sms("+628123456789", "Your code is 123456")
        .await
        .unwrap();
    assert!(id.starts_with("log-sms-"));

    service.send_sms("+14155552671", "Your code is 654321").await.unwrap();
    assert_eq!(service.sent_count(), 2);
}

#[tokio::test]
async fn test_clones_share_counter() {
    let service = LogSmsService::new(FROM);
    let clone = service.clone();

    clone.send_sms("+628123456789", "hi").await.unwrap();
    assert_eq!(service.sent_count(), 1);
}

#[tokio::test]
async fn test_rejects_non_e164_numbers() {
    let service = LogSmsService::new(FROM);

    for phone in ["08123456789", "+0123456789", "+62 812 345 6789", ""] {
        let err = service.send_sms(phone, "hi").await.unwrap_err();
        assert!(err.contains("E.164"), "{}: {}", phone, err);
    }
    assert_eq!(service.sent_count(), 0);
}

#[tokio::test]
async fn test_simulated_failure() {
    let service = LogSmsService::with_options(FROM, true);

    let err = service.send_sms("+628123456789", "hi").await.unwrap_err();
    assert!(err.contains("Simulated"));
    assert_eq!(service.sent_count(), 0);
}

#[tokio::test]
async fn test_create_log_provider() {
    let config = SmsConfig {
        provider: " Log ".to_string(),
        ..SmsConfig::default()
    };

    let service = create_sms_service(&config).unwrap();
    let id = service.send_sms("+628123456789", "hi").await.unwrap();
    assert!(id.starts_with("log-sms-"));
}

#[test]
fn test_unknown_provider_is_a_config_error() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        ..SmsConfig::default()
    };

    assert!(matches!(
        create_sms_service(&config),
        Err(InfrastructureError::Config(_))
    ));
}
