//! Lead-capture field rules.
//!
//! Email: `local@domain.tld` where the local part is `[A-Za-z0-9._%+-]+`, the
//! domain `[A-Za-z0-9.-]+` and the final label at least two ASCII letters.
//! Mobile: ten ASCII digits, the first one of `6-9`.

use serde::Serialize;
use thiserror::Error;

/// Field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Mobile number is required")]
    MobileRequired,

    #[error("Invalid mobile number (10 digits starting with 6-9)")]
    InvalidMobile,

    #[error("Password is required")]
    PasswordRequired,
}

/// Per-field errors for the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub email: Option<ValidationError>,
    pub mobile: Option<ValidationError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.mobile.is_none()
    }
}

const MOBILE_LEN: usize = 10;

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || !local.chars().all(is_local_char) {
        return Err(ValidationError::InvalidEmail);
    }

    // Only the last dot can precede an all-letter label
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return Err(ValidationError::InvalidEmail);
    };
    let host_ok = !host.is_empty() && host.chars().all(is_domain_char);
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    if host_ok && tld_ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validate an Indian mobile number.
pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if mobile.is_empty() {
        return Err(ValidationError::MobileRequired);
    }

    let bytes = mobile.as_bytes();
    let valid = bytes.len() == MOBILE_LEN
        && matches!(bytes[0], b'6'..=b'9')
        && bytes.iter().all(u8::is_ascii_digit);

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidMobile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_email_examples() {
        assert_eq!(validate_email("user@example.com"), Ok(()));
        assert_eq!(validate_email("First.Last+tag@mail.example.co.IN"), Ok(()));
        assert_eq!(validate_email("user@@example"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("userexample.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
    }

    #[test]
    fn test_email_edge_cases() {
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("user@example.c").is_err());
        assert!(validate_email("user@example.c0m").is_err());
        assert!(validate_email("user name@example.com").is_err());
        assert!(validate_email(" user@example.com").is_err());
        assert!(validate_email("usér@example.com").is_err());
        // The domain class allows consecutive dots
        assert!(validate_email("user@example..com").is_ok());
    }

    #[test]
    fn test_mobile_examples() {
        assert_eq!(validate_mobile("9876543210"), Ok(()));
        assert_eq!(validate_mobile("1234567890"), Err(ValidationError::InvalidMobile));
        assert_eq!(validate_mobile("98765432"), Err(ValidationError::InvalidMobile));
        assert_eq!(validate_mobile(""), Err(ValidationError::MobileRequired));
        assert_eq!(validate_mobile("98765432100"), Err(ValidationError::InvalidMobile));
        assert_eq!(validate_mobile("98765 4321"), Err(ValidationError::InvalidMobile));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::InvalidMobile.to_string(),
            "Invalid mobile number (10 digits starting with 6-9)"
        );
        assert_eq!(ValidationError::InvalidEmail.to_string(), "Invalid email address");
    }

    proptest! {
        #[test]
        fn prop_mobile_accepts_valid_prefix(first in 6u8..=9, rest in "[0-9]{9}") {
            let mobile = format!("{}{}", first, rest);
            prop_assert!(validate_mobile(&mobile).is_ok());
        }

        #[test]
        fn prop_mobile_rejects_low_prefix(first in 0u8..=5, rest in "[0-9]{9}") {
            let mobile = format!("{}{}", first, rest);
            prop_assert_eq!(validate_mobile(&mobile), Err(ValidationError::InvalidMobile));
        }

        #[test]
        fn prop_email_needs_exactly_one_at(local in "[a-z0-9]{1,10}", host in "[a-z]{1,10}") {
            let ok = format!("{}@{}.com", local, host);
            let doubled = format!("{}@@{}.com", local, host);
            prop_assert!(validate_email(&ok).is_ok());
            prop_assert!(validate_email(&doubled).is_err());
        }
    }
}
