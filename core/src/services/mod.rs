//! Business services: code generation, validation, pruning, delivery and the
//! token lifecycle.

pub mod notification;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use notification::{
    Channel, IdentityRecipient, MailMessage, MailServiceTrait, Notifiable, NotificationReport,
    NotifierConfig, OtpMessage, OtpNotifier, SmsServiceTrait,
};
pub use otp::{
    IssuedOtp, OtpGenerator, OtpPruner, OtpService, OtpServiceConfig, OtpValidator, PruneResult,
    SendOtpResult,
};
pub use token::TokenService;
