//! Identity utilities shared by the services and the CLI

pub mod email;
pub mod phone;

/// Mask an identity (email or phone) for logging
pub fn mask_identity(identity: &str) -> String {
    if identity.contains('@') {
        email::mask_email(identity)
    } else {
        phone::mask_phone_number(identity)
    }
}
