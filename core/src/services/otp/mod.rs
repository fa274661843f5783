//! OTP lifecycle services
//!
//! - `OtpGenerator` issues a code, replacing any previous code for the identity
//! - `OtpValidator` consumes a code on a successful match
//! - `OtpPruner` removes expired codes, once or on an interval
//! - `OtpService` wires generation and delivery together

mod config;
mod generator;
mod pruner;
mod service;
mod types;
mod validator;

#[cfg(test)]
pub(crate) mod tests;

pub use config::OtpServiceConfig;
pub use generator::OtpGenerator;
pub use pruner::{OtpPruner, PruneResult};
pub use service::OtpService;
pub use types::{IssuedOtp, SendOtpResult};
pub use validator::OtpValidator;
