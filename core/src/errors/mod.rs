//! Domain-specific error types and error handling.

use otp_shared::phone::PhoneError;
use thiserror::Error;

/// Core domain errors
///
/// A code that fails validation is not an error: validation returns
/// `Ok(false)`.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Invalid phone number: {message}")]
    InvalidPhoneNumber { message: String },

    #[error("Delivery via {channel} failed: {message}")]
    Delivery { channel: String, message: String },

    #[error("Operation not implemented: {operation}")]
    NotImplemented { operation: String },
}

impl DomainError {
    /// Wrap a storage failure with the operation that caused it
    pub fn storage(context: &str, error: impl std::fmt::Display) -> Self {
        DomainError::Storage {
            message: format!("{}: {}", context, error),
        }
    }

    /// Turn any error into a storage failure prefixed with `context`
    ///
    /// A storage error keeps its own message rather than its display form.
    pub fn into_storage(self, context: &str) -> Self {
        match self {
            DomainError::Storage { message } => DomainError::storage(context, message),
            other => DomainError::storage(context, other),
        }
    }
}

impl From<PhoneError> for DomainError {
    fn from(err: PhoneError) -> Self {
        DomainError::InvalidPhoneNumber {
            message: err.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
