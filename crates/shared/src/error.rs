//! Application-wide error types.
//!
//! `AppError` is the transport-neutral shape every layer converts into at the
//! boundary. It carries an HTTP-like status, a stable error code, a message and
//! optional structured details (offending totals, offending account id).

use serde_json::Value;
use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Domain rule violation with a specific error code.
    #[error("{message}")]
    Rule {
        /// HTTP-like status code.
        status: u16,
        /// Stable machine-readable error code.
        code: &'static str,
        /// Human-readable message.
        message: String,
        /// Structured details for the caller.
        details: Option<Value>,
    },

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Rule { status, .. } => *status,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Rule { code, .. } => *code,
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns structured details, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        match self {
            Self::Rule { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Returns true if the error is a server-side failure.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
