//! Notification recipients

use otp_shared::{email, phone};

use crate::errors::{DomainError, DomainResult};

use super::channel::Channel;

/// Anything a code can be delivered to
pub trait Notifiable: Send + Sync {
    /// Address for `channel` (email address, E.164 number), if reachable there
    fn route_for(&self, channel: Channel) -> Option<String>;

    /// Channels this recipient prefers; empty means "use the default list"
    fn otp_channels(&self) -> Vec<Channel> {
        Vec::new()
    }
}

/// Recipient derived from a bare identity string
///
/// Email identities are reached by mail, phone identities by SMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityRecipient {
    Email(String),
    Phone(String),
}

impl IdentityRecipient {
    /// Classify `identity`, normalising phone numbers to E.164 with `locale`
    ///
    /// # Errors
    /// * `DomainError::InvalidPhoneNumber` - Not an email and not parseable as a phone number
    /// * `DomainError::Validation` - Parses as a phone number but fails validation
    pub fn parse(identity: &str, locale: &str) -> DomainResult<Self> {
        let identity = identity.trim();
        if email::is_email(identity) {
            return Ok(IdentityRecipient::Email(identity.to_string()));
        }

        if !phone::validate_number(identity, locale)? {
            return Err(DomainError::Validation {
                message: format!("Identity is neither an email nor a valid phone number: {}", identity),
            });
        }

        Ok(IdentityRecipient::Phone(phone::format_phone(identity, locale)?))
    }

    pub fn channel(&self) -> Channel {
        match self {
            IdentityRecipient::Email(_) => Channel::Mail,
            IdentityRecipient::Phone(_) => Channel::Sms,
        }
    }
}

impl Notifiable for IdentityRecipient {
    fn route_for(&self, channel: Channel) -> Option<String> {
        match (self, channel) {
            (IdentityRecipient::Email(address), Channel::Mail) => Some(address.clone()),
            (IdentityRecipient::Phone(number), Channel::Sms) => Some(number.clone()),
            _ => None,
        }
    }

    fn otp_channels(&self) -> Vec<Channel> {
        vec![self.channel()]
    }
}
