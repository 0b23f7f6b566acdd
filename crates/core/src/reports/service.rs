//! Report generation service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use super::aggregate;
use super::error::ReportError;
use super::types::{AccountSummary, BalanceSheet, DateRange, IncomeStatement, TypeTotals};
use crate::ledger::{AccountType, PostedLine};
use crate::store::LedgerStore;

/// Pure builders for financial reports.
pub struct ReportService;

impl ReportService {
    /// Builds the trial balance rows from posted lines.
    #[must_use]
    pub fn generate_trial_balance(lines: &[PostedLine]) -> Vec<AccountSummary> {
        aggregate::by_account(lines)
    }

    /// Builds an income statement from per-type totals of one period.
    #[must_use]
    pub fn build_income_statement(period: DateRange, totals: &TypeTotals) -> IncomeStatement {
        let revenue = totals.normal_balance(AccountType::Revenue);
        let expense = totals.normal_balance(AccountType::Expense);

        IncomeStatement {
            period_start: period.start(),
            period_end: period.end(),
            revenue,
            expense,
            net_income: revenue - expense,
        }
    }

    /// Builds a balance sheet from cumulative per-type totals.
    ///
    /// Revenue and expense are folded into retained earnings, so the sheet
    /// balances without a period close.
    #[must_use]
    pub fn build_balance_sheet(as_of: Option<NaiveDate>, totals: &TypeTotals) -> BalanceSheet {
        let assets = totals.normal_balance(AccountType::Asset);
        let liabilities = totals.normal_balance(AccountType::Liability);
        let equity = totals.normal_balance(AccountType::Equity);
        let retained_earnings = totals.normal_balance(AccountType::Revenue)
            - totals.normal_balance(AccountType::Expense);
        let total_liabilities_and_equity = liabilities + equity + retained_earnings;

        BalanceSheet {
            as_of,
            assets,
            liabilities,
            equity,
            retained_earnings,
            total_liabilities_and_equity,
            is_balanced: assets == total_liabilities_and_equity,
        }
    }
}

/// Computes reports from the lines held by a [`LedgerStore`].
///
/// Each report reads the store once, so it never observes a partial post.
pub struct ReportEngine<S: LedgerStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LedgerStore + ?Sized> Clone for ReportEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore + ?Sized> ReportEngine<S> {
    /// Creates an engine over the given store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Per-account totals over all posted lines.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Compute`] if the store fails.
    #[instrument(skip(self))]
    pub async fn trial_balance(&self) -> Result<Vec<AccountSummary>, ReportError> {
        let lines = self.store.posted_lines(DateRange::UNBOUNDED).await?;
        debug!(lines = lines.len(), "Computing trial balance");
        Ok(ReportService::generate_trial_balance(&lines))
    }

    /// Revenue, expense and net income for transactions dated within the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if `start` is after `end`, or
    /// [`ReportError::Compute`] if the store fails.
    #[instrument(skip(self))]
    pub async fn income_statement(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<IncomeStatement, ReportError> {
        let period = DateRange::new(start, end)?;
        let lines = self.store.posted_lines(period).await?;
        debug!(lines = lines.len(), "Computing income statement");
        Ok(ReportService::build_income_statement(
            period,
            &aggregate::by_type(&lines),
        ))
    }

    /// Cumulative position over transactions dated on or before `as_of`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Compute`] if the store fails.
    #[instrument(skip(self))]
    pub async fn balance_sheet(&self, as_of: Option<NaiveDate>) -> Result<BalanceSheet, ReportError> {
        let lines = self.store.posted_lines(DateRange::up_to(as_of)).await?;
        debug!(lines = lines.len(), "Computing balance sheet");
        Ok(ReportService::build_balance_sheet(
            as_of,
            &aggregate::by_type(&lines),
        ))
    }
}
