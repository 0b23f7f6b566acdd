//! Atomic posting of validated transactions.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tally_shared::types::TransactionId;
use tracing::{info, instrument, warn};

use super::error::LedgerError;
use super::types::{ProposedTransaction, ValidatedTransaction};
use super::validation::validate;
use crate::store::{LedgerStore, StoreError};

/// Commits validated transactions through an injected [`LedgerStore`].
pub struct TransactionPoster<S: LedgerStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LedgerStore + ?Sized> Clone for TransactionPoster<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore + ?Sized> TransactionPoster<S> {
    /// Creates a poster over the given store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Posts a validated transaction as one atomic unit.
    ///
    /// The posting date is the transaction's own date, or today (UTC) when absent.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownAccount`] when a line references a missing
    /// account and [`LedgerError::Persistence`] for any other store failure. In
    /// both cases nothing was written.
    #[instrument(skip(self, transaction), fields(description = transaction.description(), lines = transaction.lines().len()))]
    pub async fn post(&self, transaction: ValidatedTransaction) -> Result<TransactionId, LedgerError> {
        let date = transaction.date().unwrap_or_else(today);

        match self.store.post_transaction(date, &transaction).await {
            Ok(id) => {
                info!(transaction_id = %id, %date, total = %transaction.totals().total_debit, "Transaction posted");
                Ok(id)
            }
            Err(StoreError::UnknownAccount(account_id)) => {
                warn!(%account_id, "Transaction references unknown account");
                Err(LedgerError::UnknownAccount { account_id })
            }
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Transaction posting failed");
                Err(LedgerError::Persistence(e))
            }
        }
    }

    /// Validates then posts a proposed transaction.
    ///
    /// # Errors
    ///
    /// Returns any validation error unchanged, otherwise as [`Self::post`].
    pub async fn submit(&self, proposed: &ProposedTransaction) -> Result<TransactionId, LedgerError> {
        let validated = validate(proposed).inspect_err(|e| {
            warn!(error = %e, code = e.error_code(), "Transaction rejected");
        })?;
        self.post(validated).await
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{AccountType, NewAccount, ProposedLine, StructuralError};
    use crate::store::InMemoryLedgerStore;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tally_shared::types::AccountId;

    async fn setup() -> (Arc<InMemoryLedgerStore>, AccountId, AccountId) {
        let store = Arc::new(InMemoryLedgerStore::new());
        let cash = store
            .create_account(NewAccount {
                code: "1000".into(),
                name: "Cash".into(),
                account_type: AccountType::Asset,
            })
            .await
            .unwrap();
        let sales = store
            .create_account(NewAccount {
                code: "4000".into(),
                name: "Sales".into(),
                account_type: AccountType::Revenue,
            })
            .await
            .unwrap();
        (store, cash.id, sales.id)
    }

    fn sale(debit_account: AccountId, credit_account: AccountId, amount: Decimal) -> ProposedTransaction {
        ProposedTransaction {
            date: NaiveDate::from_ymd_opt(2026, 2, 1),
            description: "Cash sale".into(),
            lines: vec![
                ProposedLine {
                    account_id: debit_account,
                    debit: amount,
                    credit: Decimal::ZERO,
                },
                ProposedLine {
                    account_id: credit_account,
                    debit: Decimal::ZERO,
                    credit: amount,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_submit_posts_balanced_transaction() {
        let (store, cash, sales) = setup().await;
        let poster = TransactionPoster::new(Arc::clone(&store));

        let id = poster.submit(&sale(cash, sales, dec!(100.00))).await.unwrap();

        let record = store.find_transaction(id).await.unwrap().unwrap();
        assert_eq!(record.description, "Cash sale");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(record.lines.len(), 2);
    }

    #[tokio::test]
    async fn test_post_defaults_date_to_today() {
        let (store, cash, sales) = setup().await;
        let poster = TransactionPoster::new(Arc::clone(&store));
        let mut proposed = sale(cash, sales, dec!(10));
        proposed.date = None;

        let before = today();
        let id = poster.submit(&proposed).await.unwrap();
        let after = today();

        let date = store.find_transaction(id).await.unwrap().unwrap().date;
        assert!(date >= before && date <= after);
    }

    #[tokio::test]
    async fn test_unbalanced_never_reaches_store() {
        let (store, cash, sales) = setup().await;
        let poster = TransactionPoster::new(Arc::clone(&store));
        let mut proposed = sale(cash, sales, dec!(100));
        proposed.lines[1].credit = dec!(90);

        let err = poster.submit(&proposed).await.unwrap_err();

        assert!(matches!(err, LedgerError::UnbalancedTransaction { .. }));
        assert_eq!(store.transaction_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_account_leaves_no_partial_effect() {
        let (store, cash, _) = setup().await;
        let poster = TransactionPoster::new(Arc::clone(&store));

        let err = poster
            .submit(&sale(cash, AccountId::new(404), dec!(50)))
            .await
            .unwrap_err();

        match err {
            LedgerError::UnknownAccount { account_id } => assert_eq!(account_id, AccountId::new(404)),
            other => panic!("expected unknown account, got {other:?}"),
        }
        assert_eq!(store.transaction_count().await, 0);
        assert_eq!(store.line_count().await, 0);
    }

    #[tokio::test]
    async fn test_structural_error_passes_through_submit() {
        let (store, cash, sales) = setup().await;
        let poster = TransactionPoster::new(store);
        let mut proposed = sale(cash, sales, dec!(1));
        proposed.description = "  ".into();

        assert!(matches!(
            poster.submit(&proposed).await,
            Err(LedgerError::Structural(StructuralError::EmptyDescription))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_posts_all_commit() {
        let (store, cash, sales) = setup().await;
        let poster = TransactionPoster::new(Arc::clone(&store));

        let posts = (1..=20).map(|i| {
            let poster = poster.clone();
            let proposed = sale(cash, sales, Decimal::from(i));
            async move { poster.submit(&proposed).await }
        });
        let results = futures::future::join_all(posts).await;

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(store.transaction_count().await, 20);
    }
}
