//! Input validation utilities

use common::error::{ValidationError, require};
use regex::Regex;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    require("email", email)?;

    if email.len() > 254 {
        return Err(ValidationError::Invalid {
            field: "email",
            reason: "must be at most 254 characters long".to_string(),
        });
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(ValidationError::Invalid {
            field: "email",
            reason: "invalid email format".to_string(),
        });
    }

    Ok(())
}

/// Validate a login form before any credential lookup.
///
/// Only presence is checked here; shape is the credential store's business.
pub fn validate_login_form(email: &str, password: &str) -> Result<(), ValidationError> {
    require("email", email)?;
    require("password", password)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@smartvet.com").is_ok());
        assert_eq!(validate_email(""), Err(ValidationError::Required("email")));
        assert!(matches!(
            validate_email("not-an-email"),
            Err(ValidationError::Invalid { field: "email", .. })
        ));
        let long = format!("{}@smartvet.com", "a".repeat(250));
        assert!(validate_email(&long).is_err());
    }

    #[test]
    fn test_validate_login_form_checks_both_fields() {
        assert_eq!(
            validate_login_form("", "secret"),
            Err(ValidationError::Required("email"))
        );
        assert_eq!(
            validate_login_form("vet@smartvet.com", ""),
            Err(ValidationError::Required("password"))
        );
        assert!(validate_login_form("anything", "x").is_ok());
    }
}
