//! Report data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, Amount};

use super::error::ReportError;
use crate::ledger::AccountType;

/// An inclusive range of transaction dates. An absent bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// The range covering every date.
    pub const UNBOUNDED: Self = Self {
        start: None,
        end: None,
    };

    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if `start` is after `end`.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, ReportError> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Every date on or before `end`.
    #[must_use]
    pub const fn up_to(end: Option<NaiveDate>) -> Self {
        Self { start: None, end }
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Upper bound, inclusive.
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Returns true if `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Per-account totals, one trial balance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Total debit amount.
    pub total_debit: Amount,
    /// Total credit amount.
    pub total_credit: Amount,
    /// `total_debit - total_credit`, for every account type.
    pub balance: Amount,
}

/// A debit and credit sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitCredit {
    /// Sum of debits.
    pub debit: Amount,
    /// Sum of credits.
    pub credit: Amount,
}

impl DebitCredit {
    /// Adds one line.
    pub fn add(&mut self, debit: Amount, credit: Amount) {
        self.debit += debit;
        self.credit += credit;
    }
}

/// Debit and credit sums grouped by account type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTotals {
    totals: BTreeMap<AccountType, DebitCredit>,
}

impl TypeTotals {
    /// Adds one line to its account type's sums.
    pub fn record(&mut self, account_type: AccountType, debit: Amount, credit: Amount) {
        self.totals.entry(account_type).or_default().add(debit, credit);
    }

    /// Sums for one account type, zero when nothing was recorded.
    #[must_use]
    pub fn get(&self, account_type: AccountType) -> DebitCredit {
        self.totals.get(&account_type).copied().unwrap_or_default()
    }

    /// Balance of one account type on its normal side.
    #[must_use]
    pub fn normal_balance(&self, account_type: AccountType) -> Amount {
        let sums = self.get(account_type);
        account_type.normal_balance().balance(sums.debit, sums.credit)
    }
}

/// Revenue, expense and net income over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Period start, if bounded.
    pub period_start: Option<NaiveDate>,
    /// Period end, if bounded.
    pub period_end: Option<NaiveDate>,
    /// `credit - debit` over revenue accounts.
    pub revenue: Amount,
    /// `debit - credit` over expense accounts.
    pub expense: Amount,
    /// `revenue - expense`.
    pub net_income: Amount,
}

/// Cumulative financial position as of a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Cut-off date, if any.
    pub as_of: Option<NaiveDate>,
    /// Assets.
    pub assets: Amount,
    /// Liabilities.
    pub liabilities: Amount,
    /// Contributed equity.
    pub equity: Amount,
    /// Revenue minus expense up to the cut-off.
    pub retained_earnings: Amount,
    /// `liabilities + equity + retained_earnings`.
    pub total_liabilities_and_equity: Amount,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let err = DateRange::new(Some(day(10)), Some(day(1))).unwrap_err();
        assert!(matches!(err, ReportError::InvalidDateRange { .. }));
        assert!(DateRange::new(Some(day(5)), Some(day(5))).is_ok());
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange::new(Some(day(5)), Some(day(10))).unwrap();
        assert!(!range.contains(day(4)));
        assert!(range.contains(day(5)));
        assert!(range.contains(day(10)));
        assert!(!range.contains(day(11)));
    }

    #[test]
    fn test_open_bounds() {
        assert!(DateRange::UNBOUNDED.contains(day(1)));
        let up_to = DateRange::up_to(Some(day(3)));
        assert!(up_to.contains(day(1)));
        assert!(!up_to.contains(day(4)));
        assert_eq!(up_to.start(), None);
    }
}
