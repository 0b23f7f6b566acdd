//! Report routes.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tally_core::reports::{AccountSummary, BalanceSheet, IncomeStatement};

use crate::{AppState, error::ApiError, extract::AppQuery};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/report/trial-balance", get(get_trial_balance))
        .route("/report/income-statement", get(get_income_statement))
        .route("/report/balance-sheet", get(get_balance_sheet))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for income statement report.
#[derive(Debug, Deserialize)]
pub struct IncomeStatementQuery {
    /// Start date, inclusive.
    pub start_date: Option<NaiveDate>,
    /// End date, inclusive.
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for balance sheet report.
#[derive(Debug, Deserialize)]
pub struct BalanceSheetQuery {
    /// Cut-off date, inclusive.
    pub as_of: Option<NaiveDate>,
    /// Older name for `as_of`, ignored when both are given.
    pub date: Option<NaiveDate>,
}

impl BalanceSheetQuery {
    /// The effective cut-off date.
    #[must_use]
    pub fn cut_off(&self) -> Option<NaiveDate> {
        self.as_of.or(self.date)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/report/trial-balance`
async fn get_trial_balance(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountSummary>>, ApiError> {
    Ok(Json(state.reports.trial_balance().await?))
}

/// GET `/report/income-statement`
async fn get_income_statement(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<IncomeStatementQuery>,
) -> Result<Json<IncomeStatement>, ApiError> {
    let statement = state
        .reports
        .income_statement(query.start_date, query.end_date)
        .await?;
    Ok(Json(statement))
}

/// GET `/report/balance-sheet`
async fn get_balance_sheet(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BalanceSheetQuery>,
) -> Result<Json<BalanceSheet>, ApiError> {
    Ok(Json(state.reports.balance_sheet(query.cut_off()).await?))
}
