//! MySQL repository implementations

mod otp_repository_impl;

pub use otp_repository_impl::{create_table_sql, validate_table_name, MySqlOtpRepository};
