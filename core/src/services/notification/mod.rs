//! Delivery of generated codes over mail and SMS
//!
//! Channel selection follows the recipient: a [`Notifiable`] may declare its
//! own channels, otherwise the configured default list applies. Transports
//! are injected through [`MailServiceTrait`] and [`SmsServiceTrait`].

mod channel;
mod config;
mod message;
mod notifier;
mod recipient;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use channel::{parse_channels, Channel};
pub use config::NotifierConfig;
pub use message::{MailMessage, OtpMessage};
pub use notifier::{NotificationReport, OtpNotifier};
pub use recipient::{IdentityRecipient, Notifiable};
pub use traits::{MailServiceTrait, SmsServiceTrait};
