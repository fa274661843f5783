//! SMS delivery module
//!
//! Only a log-backed transport ships here. Production gateways plug in
//! through `SmsServiceTrait`.

mod log_sms;

use std::sync::Arc;

use otp_core::SmsServiceTrait;
use otp_shared::SmsConfig;
use tracing::info;

use crate::InfrastructureError;

pub use log_sms::LogSmsService;

#[cfg(test)]
mod tests;

/// Build the SMS transport named by `sms.provider`
///
/// # Returns
/// * `Err(InfrastructureError::Config)` - The provider is unknown
pub fn create_sms_service(
    config: &SmsConfig,
) -> Result<Arc<dyn SmsServiceTrait>, InfrastructureError> {
    match config.provider.trim().to_ascii_lowercase().as_str() {
        "log" => {
            info!(from = %config.from_number, "Using log SMS provider");
            Ok(Arc::new(LogSmsService::new(config.from_number.clone())))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown SMS provider: {:?}",
            other
        ))),
    }
}
