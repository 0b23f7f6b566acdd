//! SQL ledger store.
//!
//! Implements [`LedgerStore`] over a `SeaORM` connection. Posting runs inside one
//! database transaction; reports read posted lines through a single joined query.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    FromQueryResult, JoinType, NotSet, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    SqlErr, TransactionTrait,
};
use tally_core::ledger::{
    self, Account, NewAccount, PostedLine, TransactionLine, TransactionRecord,
    ValidatedTransaction,
};
use tally_core::reports::DateRange;
use tally_core::store::{LedgerStore, StoreError};
use tally_shared::types::{AccountId, Amount, TransactionId, TransactionLineId};
use tracing::{debug, warn};

use crate::entities::{
    accounts, sea_orm_active_enums::AccountType, transaction_lines, transactions,
};

/// Maps a database error onto the store taxonomy.
///
/// Connection failures are transient; everything else is not.
pub fn store_error(err: &DbErr) -> StoreError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Unavailable(err.to_string()),
        _ => StoreError::Backend(err.to_string()),
    }
}

fn db_err(err: DbErr) -> StoreError {
    store_error(&err)
}

/// Relational [`LedgerStore`].
#[derive(Debug, Clone)]
pub struct SqlLedgerStore {
    db: DatabaseConnection,
}

impl SqlLedgerStore {
    /// Creates a new SQL ledger store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the header and lines on an open database transaction.
    async fn insert_transaction(
        txn: &DatabaseTransaction,
        date: NaiveDate,
        transaction: &ValidatedTransaction,
    ) -> Result<TransactionId, StoreError> {
        let header = transactions::ActiveModel {
            id: NotSet,
            date: Set(date),
            description: Set(transaction.description().to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(txn)
        .await
        .map_err(db_err)?;

        let mut known = HashSet::new();
        for line in transaction.lines() {
            if !known.contains(&line.account_id) {
                let exists = accounts::Entity::find_by_id(line.account_id.into_inner())
                    .one(txn)
                    .await
                    .map_err(db_err)?
                    .is_some();
                if !exists {
                    return Err(StoreError::UnknownAccount(line.account_id));
                }
                known.insert(line.account_id);
            }

            transaction_lines::ActiveModel {
                id: NotSet,
                transaction_id: Set(header.id),
                account_id: Set(line.account_id.into_inner()),
                debit: Set(minor_units(line.debit)?),
                credit: Set(minor_units(line.credit)?),
            }
            .insert(txn)
            .await
            .map_err(db_err)?;
        }

        Ok(TransactionId::new(header.id))
    }
}

fn minor_units(amount: Amount) -> Result<i64, StoreError> {
    amount
        .to_minor_units()
        .map_err(|e| StoreError::Backend(e.to_string()))
}

fn to_account(model: accounts::Model) -> Account {
    Account {
        id: AccountId::new(model.id),
        code: model.code,
        name: model.name,
        account_type: model.account_type.into(),
        created_at: model.created_at,
    }
}

#[derive(Debug, FromQueryResult)]
struct PostedLineRow {
    account_id: i64,
    code: String,
    name: String,
    account_type: AccountType,
    date: NaiveDate,
    debit: i64,
    credit: i64,
}

#[async_trait]
impl LedgerStore for SqlLedgerStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(&account.code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(StoreError::DuplicateAccountCode(account.code));
        }

        let model = accounts::ActiveModel {
            id: NotSet,
            code: Set(account.code.clone()),
            name: Set(account.name),
            account_type: Set(account.account_type.into()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            // Lost a race with a concurrent insert of the same code.
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StoreError::DuplicateAccountCode(account.code.clone())
            }
            _ => store_error(&e),
        })?;

        Ok(to_account(model))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .order_by_asc(accounts::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(to_account).collect())
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let model = accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(to_account))
    }

    async fn post_transaction(
        &self,
        date: NaiveDate,
        transaction: &ValidatedTransaction,
    ) -> Result<TransactionId, StoreError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        match Self::insert_transaction(&txn, date, transaction).await {
            Ok(id) => {
                txn.commit().await.map_err(db_err)?;
                debug!(transaction_id = %id, "Committed transaction");
                Ok(id)
            }
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    warn!(error = %rollback, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn find_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        let Some(header) = transactions::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let lines = transaction_lines::Entity::find()
            .filter(transaction_lines::Column::TransactionId.eq(header.id))
            .order_by_asc(transaction_lines::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Some(TransactionRecord {
            id,
            date: header.date,
            description: header.description,
            created_at: header.created_at,
            lines: lines
                .into_iter()
                .map(|line| TransactionLine {
                    id: TransactionLineId::new(line.id),
                    account_id: AccountId::new(line.account_id),
                    debit: Amount::from_minor_units(line.debit),
                    credit: Amount::from_minor_units(line.credit),
                })
                .collect(),
        }))
    }

    async fn posted_lines(&self, range: DateRange) -> Result<Vec<PostedLine>, StoreError> {
        let mut query = transaction_lines::Entity::find()
            .select_only()
            .column(transaction_lines::Column::AccountId)
            .column(transaction_lines::Column::Debit)
            .column(transaction_lines::Column::Credit)
            .column_as(accounts::Column::Code, "code")
            .column_as(accounts::Column::Name, "name")
            .column_as(accounts::Column::AccountType, "account_type")
            .column_as(transactions::Column::Date, "date")
            .join(
                JoinType::InnerJoin,
                transaction_lines::Relation::Transactions.def(),
            )
            .join(JoinType::InnerJoin, transaction_lines::Relation::Accounts.def());

        if let Some(start) = range.start() {
            query = query.filter(transactions::Column::Date.gte(start));
        }
        if let Some(end) = range.end() {
            query = query.filter(transactions::Column::Date.lte(end));
        }

        let rows = query
            .order_by_asc(transactions::Column::Date)
            .order_by_asc(transaction_lines::Column::Id)
            .into_model::<PostedLineRow>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| PostedLine {
                account_id: AccountId::new(row.account_id),
                code: row.code,
                name: row.name,
                account_type: ledger::AccountType::from(row.account_type),
                date: row.date,
                debit: Amount::from_minor_units(row.debit),
                credit: Amount::from_minor_units(row.credit),
            })
            .collect())
    }
}
