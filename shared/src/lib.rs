//! Shared utilities and common types for the OTP workspace
//!
//! This crate provides common functionality used across all workspace members:
//! - Configuration types (database, OTP lifecycle, delivery, logging)
//! - Identity utilities (phone parsing and formatting, email provider checks)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, LogFormat, LoggingConfig, MailConfig, MailEncryption, OtpConfig,
    PruneConfig, SmsConfig,
};
pub use utils::{email, phone};
