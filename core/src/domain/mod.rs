//! Domain layer containing the OTP entities.

pub mod entities;

pub use entities::{hash_code, OtpRecord, Token, TokenAttributes, CODE_LENGTH, CODE_MAX, CODE_MIN};
