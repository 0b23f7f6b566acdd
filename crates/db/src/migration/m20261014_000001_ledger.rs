//! Ledger schema migration.
//!
//! Creates the chart of accounts, transaction headers and transaction lines.
//! Built with the schema builder so the same migration runs on PostgreSQL and SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // CHART OF ACCOUNTS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Code).string_len(32).not_null().unique_key())
                    .col(ColumnDef::new(Accounts::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Accounts::AccountType).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // TRANSACTIONS & LINES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Date).date().not_null())
                    .col(ColumnDef::new(Transactions::Description).text().not_null())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionLines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionLines::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TransactionLines::TransactionId).big_integer().not_null())
                    .col(ColumnDef::new(TransactionLines::AccountId).big_integer().not_null())
                    .col(
                        ColumnDef::new(TransactionLines::Debit)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(TransactionLines::Debit).gte(0)),
                    )
                    .col(
                        ColumnDef::new(TransactionLines::Credit)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(TransactionLines::Credit).gte(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_lines_transaction")
                            .from(TransactionLines::Table, TransactionLines::TransactionId)
                            .to(Transactions::Table, Transactions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_lines_account")
                            .from(TransactionLines::Table, TransactionLines::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // INDEXES
        // ============================================================
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_date")
                    .table(Transactions::Table)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_lines_transaction")
                    .table(TransactionLines::Table)
                    .col(TransactionLines::TransactionId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_lines_account")
                    .table(TransactionLines::Table)
                    .col(TransactionLines::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TransactionLines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Code,
    Name,
    AccountType,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    Date,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TransactionLines {
    Table,
    Id,
    TransactionId,
    AccountId,
    Debit,
    Credit,
}
