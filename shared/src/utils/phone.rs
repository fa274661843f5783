//! Phone number utilities
//!
//! Parsing, validation and formatting go through the `phonenumber` crate
//! (libphonenumber metadata). Numbers without a country code are resolved
//! against a region derived from the configured locale.

use once_cell::sync::Lazy;
use phonenumber::{country, Mode, PhoneNumber};
use regex::Regex;
use thiserror::Error;

/// National numbers of exactly this many digits are rejected by `validate_number`
const REJECTED_NATIONAL_LENGTH: usize = 11;

// Locale separators: "en_US", "id-ID"
static LOCALE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\-]").unwrap());

/// Phone parsing and formatting errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("Unknown phone region: {region}")]
    UnknownRegion { region: String },

    #[error("Invalid phone number: {reason}")]
    Parse { reason: String },
}

/// Resolve a locale such as `id`, `en_US` or `id-ID` to a phonenumber region
pub fn region_for_locale(locale: &str) -> Result<country::Id, PhoneError> {
    let region = LOCALE_SEPARATOR
        .split(locale.trim())
        .last()
        .unwrap_or_default()
        .to_uppercase();

    region
        .parse::<country::Id>()
        .map_err(|_| PhoneError::UnknownRegion { region })
}

/// Parse a phone number, using `locale` for numbers without a country code
pub fn parse_phone(number: &str, locale: &str) -> Result<PhoneNumber, PhoneError> {
    let region = region_for_locale(locale)?;
    phonenumber::parse(Some(region), number).map_err(|e| PhoneError::Parse {
        reason: e.to_string(),
    })
}

/// Validate a phone number
///
/// A number is accepted when libphonenumber considers it valid and its
/// national significant number is not exactly 11 digits long.
///
/// Returns an error when the input cannot be parsed at all.
pub fn validate_number(number: &str, locale: &str) -> Result<bool, PhoneError> {
    let parsed = parse_phone(number, locale)?;
    let national_length = parsed.national().value().to_string().len();

    Ok(phonenumber::is_valid(&parsed) && national_length != REJECTED_NATIONAL_LENGTH)
}

/// Format a phone number as E.164 (`+628123456789`)
pub fn format_phone(number: &str, locale: &str) -> Result<String, PhoneError> {
    let parsed = parse_phone(number, locale)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Format a phone number for WhatsApp: E.164 without the leading `+`
pub fn format_whatsapp(number: &str, locale: &str) -> Result<String, PhoneError> {
    let formatted = format_phone(number, locale)?;
    Ok(formatted.trim_start_matches('+').to_string())
}

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Mask a phone number for display (e.g., +62****6789)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
