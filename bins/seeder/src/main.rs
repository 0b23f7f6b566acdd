//! Database seeder for Tally development and testing.
//!
//! Creates a starter chart of accounts. Accounts whose code already exists are
//! left untouched, so the seeder can be run repeatedly.
//!
//! Usage: cargo run --bin seeder

use tally_core::ledger::{AccountType, NewAccount};
use tally_core::store::{LedgerStore, StoreError};
use tally_db::{SqlLedgerStore, connect, migrate};
use tally_shared::AppConfig;

/// Starter chart: (code, name, type).
const STARTER_CHART: &[(&str, &str, AccountType)] = &[
    ("1000", "Cash", AccountType::Asset),
    ("1100", "Accounts Receivable", AccountType::Asset),
    ("1500", "Equipment", AccountType::Asset),
    ("2000", "Accounts Payable", AccountType::Liability),
    ("2100", "Loans Payable", AccountType::Liability),
    ("3000", "Owner's Capital", AccountType::Equity),
    ("4000", "Sales", AccountType::Revenue),
    ("4100", "Service Revenue", AccountType::Revenue),
    ("5000", "Rent Expense", AccountType::Expense),
    ("5100", "Salaries Expense", AccountType::Expense),
    ("5200", "Utilities Expense", AccountType::Expense),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = connect(&config.database).await?;
    migrate(&db).await?;
    let store = SqlLedgerStore::new(db);

    println!("Seeding chart of accounts...");
    let mut created = 0;
    for &(code, name, account_type) in STARTER_CHART {
        let account = NewAccount {
            code: code.to_string(),
            name: name.to_string(),
            account_type,
        };
        match store.create_account(account).await {
            Ok(account) => {
                created += 1;
                println!("  + {} {} ({})", account.code, account.name, account.account_type);
            }
            Err(StoreError::DuplicateAccountCode(code)) => println!("  = {code} already exists"),
            Err(e) => return Err(e.into()),
        }
    }

    println!("Seeding complete! {created} account(s) created.");
    Ok(())
}
