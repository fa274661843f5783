//! Mail delivery module

mod smtp;

pub use smtp::SmtpMailService;
