//! Email identity utilities

use validator::ValidateEmail;

/// Extract the provider (domain) part of an email address
///
/// Everything after the last `@`; the whole input when there is no `@`.
pub fn get_email_provider(email: &str) -> &str {
    match email.rfind('@') {
        Some(index) => &email[index + 1..],
        None => email,
    }
}

/// Check an email address against a disposable-provider denylist
///
/// Returns `false` only when the provider is on the denylist; syntax is
/// not checked here (see [`is_email`]).
pub fn validate_email(email: &str, disposable_providers: &[String]) -> bool {
    let provider = get_email_provider(email);
    !disposable_providers
        .iter()
        .any(|denied| denied.trim().eq_ignore_ascii_case(provider))
}

/// Whether the identity is a syntactically valid email address
pub fn is_email(identity: &str) -> bool {
    identity.validate_email()
}

/// Mask an email address for logging (e.g., u***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.rfind('@') {
        Some(index) if index > 0 => {
            let first = email.chars().next().unwrap_or('*');
            format!("{}***{}", first, &email[index..])
        }
        _ => "***".to_string(),
    }
}
