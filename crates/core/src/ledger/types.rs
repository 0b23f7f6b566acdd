//! Ledger domain types for account and transaction handling.
//!
//! This module defines the core types used for creating, validating and
//! reading back financial transactions in the double-entry bookkeeping system.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, Amount, TransactionId, TransactionLineId};

/// Account type classification (closed set).
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, receivables).
    #[serde(alias = "Asset")]
    Asset,
    /// Obligations owed (payables, loans).
    #[serde(alias = "Liability")]
    Liability,
    /// Capital contributed by owners.
    #[serde(alias = "Equity")]
    Equity,
    /// Income earned.
    #[serde(alias = "Revenue")]
    Revenue,
    /// Costs incurred.
    #[serde(alias = "Expense")]
    Expense,
}

impl AccountType {
    /// Every account type, in chart-of-accounts order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns the side on which this account type normally carries its balance.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns true for account types reported on the income statement.
    #[must_use]
    pub const fn is_income_statement(self) -> bool {
        matches!(self, Self::Revenue | Self::Expense)
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Invalid account type '{s}'. Must be one of: asset, liability, equity, revenue, expense"
            )),
        }
    }
}

/// The side on which an account type normally carries its balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Balance is `debit - credit`.
    Debit,
    /// Balance is `credit - debit`.
    Credit,
}

impl NormalBalance {
    /// Computes the balance of a debit/credit pair under this convention.
    #[must_use]
    pub fn balance(self, debit: Amount, credit: Amount) -> Amount {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identity.
    pub id: AccountId,
    /// Unique account code (e.g. "1000").
    pub code: String,
    /// Display name (e.g. "Cash").
    pub name: String,
    /// Account classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Unique account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
}

/// A single line of a proposed transaction, as submitted by the caller.
///
/// Amounts are raw decimals; the validator checks sign and scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedLine {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount (zero if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit: Decimal,
}

/// A transaction as submitted by the caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedTransaction {
    /// Transaction date. Defaults to the posting day when absent.
    pub date: Option<NaiveDate>,
    /// A description of the transaction.
    pub description: String,
    /// The lines (must have at least 2).
    pub lines: Vec<ProposedLine>,
}

/// A line that passed validation, with amounts at ledger scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedLine {
    /// The account to post to.
    pub account_id: AccountId,
    /// Non-negative debit amount.
    pub debit: Amount,
    /// Non-negative credit amount.
    pub credit: Amount,
}

/// A transaction that passed structural and balance validation.
///
/// Only [`crate::ledger::validate`] constructs this type, so holding one is
/// proof that debits equal credits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransaction {
    date: Option<NaiveDate>,
    description: String,
    lines: Vec<ValidatedLine>,
    totals: TransactionTotals,
}

impl ValidatedTransaction {
    pub(crate) fn new(
        date: Option<NaiveDate>,
        description: String,
        lines: Vec<ValidatedLine>,
        totals: TransactionTotals,
    ) -> Self {
        Self {
            date,
            description,
            lines,
            totals,
        }
    }

    /// The requested transaction date, if any.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// The trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The validated lines, in submission order.
    #[must_use]
    pub fn lines(&self) -> &[ValidatedLine] {
        &self.lines
    }

    /// The debit and credit totals.
    #[must_use]
    pub const fn totals(&self) -> &TransactionTotals {
        &self.totals
    }
}

/// Transaction totals for validation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTotals {
    /// Total debit amount.
    pub total_debit: Amount,
    /// Total credit amount.
    pub total_credit: Amount,
    /// Whether the transaction is balanced (debits == credits).
    pub is_balanced: bool,
}

impl TransactionTotals {
    /// Creates new transaction totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Amount, total_credit: Amount) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Amount {
        self.total_debit - self.total_credit
    }
}

/// A posted transaction read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction identity.
    pub id: TransactionId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lines, in posting order.
    pub lines: Vec<TransactionLine>,
}

/// A posted transaction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLine {
    /// Line identity.
    pub id: TransactionLineId,
    /// Account posted to.
    pub account_id: AccountId,
    /// Debit amount.
    pub debit: Amount,
    /// Credit amount.
    pub credit: Amount,
}

/// A posted line joined to its account and its transaction date.
///
/// This is the input of every report aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedLine {
    /// Account posted to.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Date of the parent transaction.
    pub date: NaiveDate,
    /// Debit amount.
    pub debit: Amount,
    /// Credit amount.
    pub credit: Amount,
}
