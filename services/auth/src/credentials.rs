//! Credential lookup port and the built-in demo account table

use std::collections::BTreeSet;

use common::error::{ValidationError, require};
use tracing::debug;

use crate::models::{PERMISSION_ADMIN, PERMISSION_DELETE, PERMISSION_EDIT, UserProfile};
use crate::validation::validate_email;

/// Resolves an email/password pair to a user profile.
///
/// Implementations decide how secrets are stored; the session gate only
/// sees the outcome.
pub trait CredentialLookup: Send + Sync {
    /// Return the matching profile, or `None` when nothing matches exactly
    fn validate(&self, email: &str, password: &str) -> Option<UserProfile>;
}

/// One entry of a [`StaticCredentials`] table
#[derive(Debug, Clone)]
pub struct Account {
    pub profile: UserProfile,
    pub password: String,
}

/// Fixed in-memory credential table.
///
/// Passwords are compared in plain text. This is a demo gate, not a
/// security boundary.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    accounts: Vec<Account>,
}

impl StaticCredentials {
    /// Build a table, rejecting accounts with a malformed email or empty password
    pub fn new(accounts: Vec<Account>) -> Result<Self, ValidationError> {
        for account in &accounts {
            validate_email(&account.profile.email)?;
            require("password", &account.password)?;
        }
        Ok(Self { accounts })
    }

    /// The two demo accounts shipped with the front-end
    pub fn demo() -> Self {
        let permissions = |names: &[&str]| -> BTreeSet<String> {
            names.iter().map(|p| p.to_string()).collect()
        };

        Self {
            accounts: vec![
                Account {
                    profile: UserProfile {
                        id: 1,
                        name: "Dr. João Silva".to_string(),
                        email: "admin@smartvet.com".to_string(),
                        role: "Administrator".to_string(),
                        avatar: "👨‍⚕️".to_string(),
                        permissions: permissions(&[
                            PERMISSION_ADMIN,
                            PERMISSION_EDIT,
                            PERMISSION_DELETE,
                        ]),
                    },
                    password: "admin123".to_string(),
                },
                Account {
                    profile: UserProfile {
                        id: 2,
                        name: "Dra. Maria Santos".to_string(),
                        email: "vet@smartvet.com".to_string(),
                        role: "Veterinarian".to_string(),
                        avatar: "👩‍⚕️".to_string(),
                        permissions: permissions(&[PERMISSION_EDIT]),
                    },
                    password: "vet123".to_string(),
                },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl CredentialLookup for StaticCredentials {
    fn validate(&self, email: &str, password: &str) -> Option<UserProfile> {
        let found = self
            .accounts
            .iter()
            .find(|account| account.profile.email == email && account.password == password)
            .map(|account| account.profile.clone());

        debug!("Credential lookup for {}: {}", email, found.is_some());
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accounts_match_exactly() {
        let credentials = StaticCredentials::demo();
        assert_eq!(credentials.len(), 2);

        let vet = credentials
            .validate("vet@smartvet.com", "vet123")
            .expect("vet account");
        assert_eq!(vet.id, 2);
        assert!(!vet.is_admin());

        assert!(credentials.validate("VET@smartvet.com", "vet123").is_none());
        assert!(credentials.validate("vet@smartvet.com", "vet123 ").is_none());
        assert!(credentials.validate("admin@smartvet.com", "vet123").is_none());
    }

    #[test]
    fn test_new_rejects_bad_accounts() {
        let mut account = StaticCredentials::demo().accounts[0].clone();
        account.password = String::new();
        assert_eq!(
            StaticCredentials::new(vec![account.clone()]).unwrap_err(),
            ValidationError::Required("password")
        );

        account.password = "pw".to_string();
        account.profile.email = "nobody".to_string();
        assert!(StaticCredentials::new(vec![account]).is_err());
    }
}
