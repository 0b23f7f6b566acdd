//! In-memory ledger store.
//!
//! Backs the unit and api test-suites. A single `RwLock` guards all state, so a
//! post is one write-locked critical section and every read sees either all of
//! a transaction or none of it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tally_shared::types::{AccountId, TransactionId, TransactionLineId};
use tokio::sync::RwLock;

use super::{LedgerStore, StoreError};
use crate::ledger::{
    Account, NewAccount, PostedLine, TransactionLine, TransactionRecord, ValidatedTransaction,
};
use crate::reports::DateRange;

#[derive(Debug, Default)]
struct State {
    accounts: BTreeMap<AccountId, Account>,
    transactions: BTreeMap<TransactionId, TransactionRecord>,
    last_account_id: i64,
    last_transaction_id: i64,
    last_line_id: i64,
}

/// A [`LedgerStore`] that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<State>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of posted transactions.
    pub async fn transaction_count(&self) -> usize {
        self.state.read().await.transactions.len()
    }

    /// Number of posted lines across all transactions.
    pub async fn line_count(&self) -> usize {
        self.state
            .read()
            .await
            .transactions
            .values()
            .map(|t| t.lines.len())
            .sum()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut state = self.state.write().await;

        if state.accounts.values().any(|a| a.code == account.code) {
            return Err(StoreError::DuplicateAccountCode(account.code));
        }

        state.last_account_id += 1;
        let created = Account {
            id: AccountId::new(state.last_account_id),
            code: account.code,
            name: account.name,
            account_type: account.account_type,
            created_at: Utc::now(),
        };
        state.accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let state = self.state.read().await;
        let mut accounts: Vec<_> = state.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn post_transaction(
        &self,
        date: NaiveDate,
        transaction: &ValidatedTransaction,
    ) -> Result<TransactionId, StoreError> {
        let mut state = self.state.write().await;

        // Check every reference before touching any counter or map.
        if let Some(missing) = transaction
            .lines()
            .iter()
            .find(|l| !state.accounts.contains_key(&l.account_id))
        {
            return Err(StoreError::UnknownAccount(missing.account_id));
        }

        state.last_transaction_id += 1;
        let id = TransactionId::new(state.last_transaction_id);

        let mut lines = Vec::with_capacity(transaction.lines().len());
        for line in transaction.lines() {
            state.last_line_id += 1;
            lines.push(TransactionLine {
                id: TransactionLineId::new(state.last_line_id),
                account_id: line.account_id,
                debit: line.debit,
                credit: line.credit,
            });
        }

        state.transactions.insert(
            id,
            TransactionRecord {
                id,
                date,
                description: transaction.description().to_string(),
                created_at: Utc::now(),
                lines,
            },
        );
        Ok(id)
    }

    async fn find_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        Ok(self.state.read().await.transactions.get(&id).cloned())
    }

    async fn posted_lines(&self, range: DateRange) -> Result<Vec<PostedLine>, StoreError> {
        let state = self.state.read().await;
        let mut posted = Vec::new();

        for record in state.transactions.values().filter(|t| range.contains(t.date)) {
            for line in &record.lines {
                let account = state.accounts.get(&line.account_id).ok_or_else(|| {
                    StoreError::Backend(format!(
                        "line {} references missing account {}",
                        line.id, line.account_id
                    ))
                })?;
                posted.push(PostedLine {
                    account_id: account.id,
                    code: account.code.clone(),
                    name: account.name.clone(),
                    account_type: account.account_type,
                    date: record.date,
                    debit: line.debit,
                    credit: line.credit,
                });
            }
        }

        Ok(posted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{AccountType, ProposedLine, ProposedTransaction, validate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn new_account(code: &str, account_type: AccountType) -> NewAccount {
        NewAccount {
            code: code.to_string(),
            name: format!("Account {code}"),
            account_type,
        }
    }

    fn transfer(from: AccountId, to: AccountId, amount: Decimal) -> ValidatedTransaction {
        validate(&ProposedTransaction {
            date: None,
            description: "Transfer".to_string(),
            lines: vec![
                ProposedLine {
                    account_id: to,
                    debit: amount,
                    credit: Decimal::ZERO,
                },
                ProposedLine {
                    account_id: from,
                    debit: Decimal::ZERO,
                    credit: amount,
                },
            ],
        })
        .unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_accounts_ordered_by_code() {
        let store = InMemoryLedgerStore::new();
        store.create_account(new_account("4000", AccountType::Revenue)).await.unwrap();
        store.create_account(new_account("1000", AccountType::Asset)).await.unwrap();

        let codes: Vec<_> = store
            .list_accounts()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.code)
            .collect();
        assert_eq!(codes, vec!["1000", "4000"]);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let store = InMemoryLedgerStore::new();
        store.create_account(new_account("1000", AccountType::Asset)).await.unwrap();

        let err = store
            .create_account(new_account("1000", AccountType::Expense))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateAccountCode("1000".into()));
    }

    #[tokio::test]
    async fn test_post_and_read_back() {
        let store = InMemoryLedgerStore::new();
        let cash = store.create_account(new_account("1000", AccountType::Asset)).await.unwrap();
        let sales = store.create_account(new_account("4000", AccountType::Revenue)).await.unwrap();

        let id = store
            .post_transaction(day(1), &transfer(sales.id, cash.id, dec!(25.50)))
            .await
            .unwrap();

        let record = store.find_transaction(id).await.unwrap().unwrap();
        assert_eq!(record.date, day(1));
        assert_eq!(record.lines.len(), 2);
        assert_eq!(record.lines[0].account_id, cash.id);
        assert_eq!(record.lines[0].debit.to_string(), "25.50");
        assert!(store.find_transaction(TransactionId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_account_writes_nothing() {
        let store = InMemoryLedgerStore::new();
        let cash = store.create_account(new_account("1000", AccountType::Asset)).await.unwrap();

        let err = store
            .post_transaction(day(1), &transfer(AccountId::new(999), cash.id, dec!(10)))
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::UnknownAccount(AccountId::new(999)));
        assert_eq!(store.transaction_count().await, 0);
        assert_eq!(store.line_count().await, 0);
    }

    #[tokio::test]
    async fn test_posted_lines_filtered_by_date() {
        let store = InMemoryLedgerStore::new();
        let cash = store.create_account(new_account("1000", AccountType::Asset)).await.unwrap();
        let sales = store.create_account(new_account("4000", AccountType::Revenue)).await.unwrap();

        for d in [1, 10, 20] {
            store
                .post_transaction(day(d), &transfer(sales.id, cash.id, dec!(5)))
                .await
                .unwrap();
        }

        let all = store.posted_lines(DateRange::UNBOUNDED).await.unwrap();
        assert_eq!(all.len(), 6);

        let range = DateRange::new(Some(day(10)), Some(day(20))).unwrap();
        let filtered = store.posted_lines(range).await.unwrap();
        assert_eq!(filtered.len(), 4);
        assert!(filtered.iter().all(|l| l.date >= day(10)));
        assert_eq!(filtered[0].code, "1000");
        assert_eq!(filtered[0].account_type, AccountType::Asset);
    }
}
