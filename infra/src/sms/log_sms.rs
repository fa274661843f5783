//! SMS service that writes messages to the log instead of a gateway

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use otp_core::services::notification::SmsServiceTrait;
use otp_shared::phone::mask_phone_number;

use crate::InfrastructureError;

// E.164: leading '+', up to 15 digits, no leading zero
static E164: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").unwrap());

/// Log-only SMS transport
///
/// Messages are recorded through `tracing` with the number masked. The
/// message body (and so the code) is only logged at debug level.
#[derive(Clone)]
pub struct LogSmsService {
    from_number: String,
    sent: Arc<AtomicU64>,
    simulate_failure: bool,
}

impl LogSmsService {
    /// Service logging messages as sent from `from_number`
    pub fn new(from_number: impl Into<String>) -> Self {
        Self::with_options(from_number, false)
    }

    /// With `simulate_failure`, every message is rejected
    pub fn with_options(from_number: impl Into<String>, simulate_failure: bool) -> Self {
        Self {
            from_number: from_number.into(),
            sent: Arc::new(AtomicU64::new(0)),
            simulate_failure,
        }
    }

    /// Number of messages accepted so far
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }

    fn deliver(&self, phone: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked = mask_phone_number(phone);

        if !E164.is_match(phone) {
            return Err(InfrastructureError::Sms(format!(
                "Phone number is not in E.164 format: {}",
                masked
            )));
        }

        if self.simulate_failure {
            warn!(phone = %masked, "Log SMS service simulating failure");
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("log-sms-{}", Uuid::new_v4());
        let count = self.sent.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_service",
            provider = "log",
            from = %self.from_number,
            phone = %masked,
            message_id = %message_id,
            count,
            "SMS accepted"
        );
        debug!(target: "sms_service", message_id = %message_id, body = %message);

        Ok(message_id)
    }
}

#[async_trait]
impl SmsServiceTrait for LogSmsService {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        self.deliver(phone, message).map_err(|e| e.to_string())
    }
}
