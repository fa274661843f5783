//! Delivery channels

use std::fmt;
use std::str::FromStr;

use crate::errors::{DomainError, DomainResult};

/// Channel a code can be delivered over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Mail,
    Sms,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Mail => "mail",
            Channel::Sms => "sms",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mail" | "email" => Ok(Channel::Mail),
            "sms" | "text" => Ok(Channel::Sms),
            other => Err(DomainError::Validation {
                message: format!("Unknown notification channel: {}", other),
            }),
        }
    }
}

/// Parse a configured channel list, dropping duplicates and keeping order
pub fn parse_channels<S: AsRef<str>>(names: &[S]) -> DomainResult<Vec<Channel>> {
    let mut channels = Vec::with_capacity(names.len());
    for name in names {
        let channel: Channel = name.as_ref().parse()?;
        if !channels.contains(&channel) {
            channels.push(channel);
        }
    }
    Ok(channels)
}
