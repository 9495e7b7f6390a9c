//! # AppError
//!
//! Centralized error handling for the Plaza ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all plaza-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, Policy)
    #[error("{0} not found")]
    NotFound(String),

    /// Validation failure (e.g., malformed multipart form)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Credential failure (unknown login id or wrong password)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (e.g., DB down, upload dir unwritable)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for Plaza logic.
pub type Result<T> = std::result::Result<T, AppError>;
