//! Custom error types for the clinic crate

use common::error::ValidationError;
use reqwest::StatusCode;
use thiserror::Error;

/// Custom error type for clinic operations
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Request never got a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// Form rejected before sending
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Base URL or path could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClinicError {
    /// Message suitable for a dismissible notification
    pub fn user_message(&self) -> String {
        match self {
            ClinicError::Network(_) => "Connection error with the server".to_string(),
            ClinicError::Status { message, .. } => message.clone(),
            ClinicError::Validation(e) => e.to_string(),
            ClinicError::InvalidUrl(_) => "Client is misconfigured".to_string(),
        }
    }
}

/// Type alias for clinic results
pub type ClinicResult<T> = Result<T, ClinicError>;
