//! Types returned by the OTP services

use crate::domain::entities::OtpRecord;
use crate::services::notification::NotificationReport;

/// A freshly generated code
///
/// The plaintext `code` exists only here; the stored record holds its digest.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    /// The record as stored
    pub record: OtpRecord,
    /// The 6-digit code to deliver
    pub code: String,
}

impl IssuedOtp {
    /// Validity window in whole minutes, rounded up
    pub fn expires_in_minutes(&self) -> i64 {
        let seconds = (self.record.expires_at - self.record.created_at).num_seconds();
        (seconds.max(0) + 59) / 60
    }
}

/// Result of generating and delivering a code
#[derive(Debug, Clone)]
pub struct SendOtpResult {
    pub issued: IssuedOtp,
    pub report: NotificationReport,
}
