//! Custom error types for the common library
//!
//! This module defines the error types shared by the SmartVet crates:
//! failures of the key/value storage and client-side input validation.

use thiserror::Error;

/// Custom error type for key/value storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error occurred while reading or writing the backing medium
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be (de)serialized
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key is not usable by the store
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The store lock was poisoned by a panicking writer
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Input rejected before it reaches any backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was left blank
    #[error("{0} is required")]
    Required(&'static str),

    /// A field has the wrong shape
    #[error("Invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    /// Name of the offending field, for the form to focus
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required(field) => field,
            ValidationError::Invalid { field, .. } => field,
        }
    }
}

/// Fail with [`ValidationError::Required`] when `value` is blank
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_whitespace() {
        assert_eq!(require("email", "   "), Err(ValidationError::Required("email")));
        assert!(require("email", "a@b.co").is_ok());
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Invalid {
            field: "email",
            reason: "missing @".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid email: missing @");
        assert_eq!(err.field(), "email");
        assert_eq!(ValidationError::Required("name").to_string(), "name is required");
    }
}
