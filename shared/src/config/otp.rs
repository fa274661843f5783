//! OTP lifecycle configuration

use serde::{Deserialize, Deserializer, Serialize};

/// Default table holding issued codes
pub const DEFAULT_TABLE: &str = "otp_verifications";

/// Default validity window of a generated code, in minutes
pub const DEFAULT_EXPIRES_MINUTES: i64 = 10;

/// Settings recognised by the OTP services
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Table the codes are persisted in
    pub table: String,

    /// Default expiry of a generated code in minutes
    pub expires_minutes: i64,

    /// Channels used when a recipient does not declare its own.
    /// Accepts a list or a comma-separated string ("mail, sms").
    #[serde(deserialize_with = "string_or_list")]
    pub default_channels: Vec<String>,

    /// Locale (region) used when parsing phone numbers without a country code
    pub phone_locale: String,

    /// Disposable email providers rejected by `email::validate_email`
    #[serde(deserialize_with = "string_or_list")]
    pub disposable_email_providers: Vec<String>,

    /// Application name rendered in notifications
    pub app_name: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            table: String::from(DEFAULT_TABLE),
            expires_minutes: DEFAULT_EXPIRES_MINUTES,
            default_channels: vec![String::from("mail")],
            phone_locale: String::from("id"),
            disposable_email_providers: Vec::new(),
            app_name: String::from("OTP"),
        }
    }
}

impl OtpConfig {
    /// Default expiry expressed in seconds
    pub fn expires_seconds(&self) -> i64 {
        self.expires_minutes * 60
    }
}

/// Background pruning of expired codes
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PruneConfig {
    /// How often to prune (in seconds)
    pub interval_seconds: u64,
    /// Whether the background task runs at all
    pub enabled: bool,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            enabled: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    String(String),
    List(Vec<String>),
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match StringOrList::deserialize(deserializer)? {
        StringOrList::String(value) => value.split(',').map(str::to_string).collect(),
        StringOrList::List(values) => values,
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
