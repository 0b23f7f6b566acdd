//! Ledger store error types.

use tally_shared::AppError;
use tally_shared::types::AccountId;
use thiserror::Error;

/// Errors reported by a [`super::LedgerStore`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A transaction line references an account that does not exist.
    #[error("Account not found: {0}")]
    UnknownAccount(AccountId),

    /// An account with this code already exists.
    #[error("Account code already exists: {0}")]
    DuplicateAccountCode(String),

    /// The backend is temporarily unreachable (connection refused, pool exhausted).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("Store failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns true if the failed operation may succeed when retried unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownAccount(_) => Self::NotFound(err.to_string()),
            StoreError::DuplicateAccountCode(_) => Self::Conflict(err.to_string()),
            StoreError::Unavailable(_) | StoreError::Backend(_) => Self::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(StoreError::Unavailable("pool timed out".into()).is_retryable());
        assert!(!StoreError::Backend("constraint".into()).is_retryable());
        assert!(!StoreError::UnknownAccount(AccountId::new(1)).is_retryable());
        assert!(!StoreError::DuplicateAccountCode("1000".into()).is_retryable());
    }

    #[test]
    fn test_app_error_mapping() {
        assert_eq!(
            AppError::from(StoreError::DuplicateAccountCode("1000".into())).status_code(),
            409
        );
        assert_eq!(AppError::from(StoreError::UnknownAccount(AccountId::new(1))).status_code(), 404);
        assert_eq!(AppError::from(StoreError::Backend("io".into())).status_code(), 500);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            StoreError::UnknownAccount(AccountId::new(7)).to_string(),
            "Account not found: 7"
        );
        assert_eq!(
            StoreError::DuplicateAccountCode("1000".into()).to_string(),
            "Account code already exists: 1000"
        );
    }
}
