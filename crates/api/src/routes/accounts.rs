//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tally_core::ledger::{Account, AccountType, NewAccount};
use tally_shared::AppError;
use tracing::info;

use crate::{AppState, error::ApiError, extract::AppJson};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/accounts", get(list_accounts).post(create_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Unique account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type, case-insensitive.
    #[serde(rename = "type")]
    pub account_type: String,
}

/// GET `/accounts` - List the chart of accounts ordered by code.
async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(state.store.list_accounts().await?))
}

/// POST `/accounts` - Create an account.
async fn create_account(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let code = payload.code.trim();
    let name = payload.name.trim();
    if code.is_empty() || name.is_empty() {
        return Err(AppError::Validation("Account code and name are required".into()).into());
    }
    let account_type: AccountType = payload.account_type.parse().map_err(AppError::Validation)?;

    let account = state
        .store
        .create_account(NewAccount {
            code: code.to_string(),
            name: name.to_string(),
            account_type,
        })
        .await?;

    info!(account_id = %account.id, code = %account.code, "Account created");
    Ok((StatusCode::CREATED, Json(account)))
}
