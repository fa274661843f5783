//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - `OtpRepository` implementation with schema bootstrap

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::MySqlOtpRepository;
