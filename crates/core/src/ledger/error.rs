//! Ledger error types for validation and posting.
//!
//! This module defines all errors that can occur while validating and posting
//! a transaction: structural problems, balance violations, referential
//! violations discovered inside the posting unit of work, and store failures.

use serde_json::json;
use tally_shared::AppError;
use tally_shared::types::{AccountId, Amount};
use thiserror::Error;

use crate::store::StoreError;

/// Malformed transaction input.
///
/// Line positions are 1-based, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The request could not be read as a transaction (missing field, wrong type).
    #[error("Malformed transaction: {reason}")]
    Malformed {
        /// What was wrong with the input.
        reason: String,
    },

    /// Description is missing or blank.
    #[error("Transaction description is required")]
    EmptyDescription,

    /// Fewer than two lines were submitted.
    #[error("Transaction must have at least 2 lines, got {count}")]
    InsufficientLines {
        /// Number of lines submitted.
        count: usize,
    },

    /// A debit or credit amount is below zero.
    #[error("Line {position} has a negative amount")]
    NegativeAmount {
        /// 1-based line position.
        position: usize,
    },

    /// A debit or credit amount has more than two fractional digits.
    #[error("Line {position} has an amount with more than 2 fractional digits")]
    ExcessPrecision {
        /// 1-based line position.
        position: usize,
    },

    /// A debit or credit amount is too large to store.
    #[error("Line {position} has an amount that is out of range")]
    AmountOutOfRange {
        /// 1-based line position.
        position: usize,
    },
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Transaction input is malformed.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// Transaction is not balanced (debits != credits).
    #[error("Transaction is not balanced. Debit: {total_debit}, Credit: {total_credit}")]
    UnbalancedTransaction {
        /// Sum of all debit amounts.
        total_debit: Amount,
        /// Sum of all credit amounts.
        total_credit: Amount,
    },

    // ========== Posting Errors ==========
    /// A line references an account that does not exist.
    #[error("Account not found: {account_id}")]
    UnknownAccount {
        /// The offending account reference.
        account_id: AccountId,
    },

    /// The ledger store failed.
    #[error("Persistence error: {0}")]
    Persistence(#[source] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Structural(_) => "STRUCTURAL_ERROR",
            Self::UnbalancedTransaction { .. } => "UNBALANCED_TRANSACTION",
            Self::UnknownAccount { .. } => "UNKNOWN_ACCOUNT",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::Structural(_) | Self::UnbalancedTransaction { .. } => 400,

            // 422 Unprocessable - referential errors
            Self::UnknownAccount { .. } => 422,

            // 500 Internal Server Error
            Self::Persistence(_) => 500,
        }
    }

    /// Returns true if the caller may retry the same request.
    ///
    /// Validation and referential errors never are: they must be fixed and resubmitted.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(e) if e.is_retryable())
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let details = match &err {
            LedgerError::UnbalancedTransaction {
                total_debit,
                total_credit,
            } => Some(json!({
                "total_debit": total_debit,
                "total_credit": total_credit,
            })),
            LedgerError::UnknownAccount { account_id } => Some(json!({ "account_id": account_id })),
            LedgerError::Structural(_) | LedgerError::Persistence(_) => None,
        };

        Self::Rule {
            status: err.http_status_code(),
            code: err.error_code(),
            message: err.to_string(),
            details,
        }
    }
}
