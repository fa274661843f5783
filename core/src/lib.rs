//! # OTP Core
//!
//! Domain layer of the OTP lifecycle manager: the persisted `OtpRecord`, the
//! `Token` value object, the repository interface with an in-memory store,
//! and the services that generate, deliver, validate and prune codes.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{hash_code, OtpRecord, Token, TokenAttributes, CODE_LENGTH, CODE_MAX, CODE_MIN};
pub use errors::{DomainError, DomainResult};
pub use repositories::{InMemoryOtpRepository, OtpRepository};
pub use services::{
    Channel, IdentityRecipient, IssuedOtp, MailMessage, MailServiceTrait, Notifiable,
    NotificationReport, NotifierConfig, OtpGenerator, OtpMessage, OtpNotifier, OtpPruner,
    OtpService, OtpServiceConfig, OtpValidator, PruneResult, SendOtpResult, SmsServiceTrait,
    TokenService,
};
