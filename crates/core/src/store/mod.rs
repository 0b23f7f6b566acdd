//! The ledger store interface.
//!
//! Every component reaches persistence through [`LedgerStore`]. Implementations
//! must post a transaction as one atomic unit and serve reads that never observe
//! a partially posted transaction.

pub mod error;
pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use tally_shared::types::{AccountId, TransactionId};

use crate::ledger::{Account, NewAccount, PostedLine, TransactionRecord, ValidatedTransaction};
use crate::reports::DateRange;

pub use error::StoreError;
pub use memory::InMemoryLedgerStore;

/// Persistence operations required by the ledger and report engine.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Adds an account to the chart of accounts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateAccountCode`] when the code is taken.
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Lists every account, ordered by code.
    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError>;

    /// Looks up one account.
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Writes the header and every line of a validated transaction atomically.
    ///
    /// Each referenced account is checked inside the same unit of work; on any
    /// failure nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownAccount`] for the first line whose account
    /// does not exist.
    async fn post_transaction(
        &self,
        date: NaiveDate,
        transaction: &ValidatedTransaction,
    ) -> Result<TransactionId, StoreError>;

    /// Reads back a posted transaction with its lines.
    async fn find_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, StoreError>;

    /// Returns every posted line whose transaction date lies in `range`,
    /// joined to its account.
    async fn posted_lines(&self, range: DateRange) -> Result<Vec<PostedLine>, StoreError>;
}
