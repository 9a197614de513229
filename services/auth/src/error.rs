//! Custom error types for the authentication crate

use common::error::{StorageError, ValidationError};
use thiserror::Error;

/// Custom error type for session gate operations
#[derive(Error, Debug)]
pub enum AuthError {
    /// No account matches the email/password pair
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Login form incomplete
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Session could not be written or removed
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Type alias for authentication results
pub type AuthResult<T> = Result<T, AuthError>;
