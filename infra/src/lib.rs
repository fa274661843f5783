//! # Infrastructure Layer
//!
//! Concrete implementations behind the core traits:
//! - **Database**: MySQL `OtpRepository` using SQLx, pool management, schema bootstrap
//! - **Mail**: SMTP delivery using lettre
//! - **SMS**: log-only delivery for development
//! - **Config / telemetry**: layered configuration loading and tracing setup

pub mod config;
pub mod database;
pub mod mail;
pub mod sms;
pub mod telemetry;

pub use config::{load_config, load_config_from};
pub use database::{DatabasePool, MySqlOtpRepository};
pub use mail::SmtpMailService;
pub use sms::{create_sms_service, LogSmsService};
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Mail transport error
    #[error("Mail error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<InfrastructureError> for otp_core::DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => otp_core::DomainError::Storage {
                message: e.to_string(),
            },
            InfrastructureError::Mail(message) => otp_core::DomainError::Delivery {
                channel: "mail".to_string(),
                message,
            },
            InfrastructureError::Sms(message) => otp_core::DomainError::Delivery {
                channel: "sms".to_string(),
                message,
            },
            InfrastructureError::Config(message) => otp_core::DomainError::Validation { message },
        }
    }
}
