//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Domain types for accounts, proposed and posted transactions
//! - Business rule validation (structure and balance)
//! - Atomic posting through the injected ledger store
//! - Error types for ledger operations

pub mod error;
pub mod poster;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::{LedgerError, StructuralError};
pub use poster::TransactionPoster;
pub use types::{
    Account, AccountType, NewAccount, NormalBalance, PostedLine, ProposedLine,
    ProposedTransaction, TransactionLine, TransactionRecord, TransactionTotals, ValidatedLine,
    ValidatedTransaction,
};
pub use validation::validate;
