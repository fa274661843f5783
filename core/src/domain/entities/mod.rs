//! Domain entities representing issued codes.

pub mod otp_record;
pub mod token;

pub use otp_record::{hash_code, OtpRecord, CODE_LENGTH, CODE_MAX, CODE_MIN};
pub use token::{Token, TokenAttributes};
