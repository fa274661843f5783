//! Repository interfaces for persisting issued codes.

pub mod otp;

pub use otp::{InMemoryOtpRepository, OtpRepository};
