//! Transaction routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::ledger::{
    LedgerError, ProposedLine, ProposedTransaction, StructuralError, TransactionRecord,
};
use tally_shared::AppError;
use tally_shared::types::{AccountId, TransactionId};

use crate::{AppState, error::ApiError};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction))
        .route("/transactions/{transaction_id}", get(get_transaction))
}

/// Request body for posting a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Transaction date (defaults to today).
    pub date: Option<NaiveDate>,
    /// Description.
    pub description: String,
    /// Debit/credit lines.
    pub items: Vec<LineItemRequest>,
}

/// One line of a transaction request.
#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    /// Account to post to.
    pub account_id: AccountId,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
}

/// Response for a posted transaction.
#[derive(Debug, Serialize)]
pub struct CreateTransactionResponse {
    /// New transaction id.
    pub id: TransactionId,
}

impl From<CreateTransactionRequest> for ProposedTransaction {
    fn from(request: CreateTransactionRequest) -> Self {
        Self {
            date: request.date,
            description: request.description,
            lines: request
                .items
                .into_iter()
                .map(|item| ProposedLine {
                    account_id: item.account_id,
                    debit: item.debit,
                    credit: item.credit,
                })
                .collect(),
        }
    }
}

/// POST `/transactions` - Validate and post a transaction.
///
/// A body that does not deserialize is a structural error, like any other
/// malformed transaction.
async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateTransactionResponse>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        LedgerError::from(StructuralError::Malformed {
            reason: rejection.body_text(),
        })
    })?;
    let proposed = ProposedTransaction::from(payload);
    let id = state.poster.submit(&proposed).await?;
    Ok((StatusCode::CREATED, Json(CreateTransactionResponse { id })))
}

/// GET `/transactions/{transaction_id}` - Get a transaction with its lines.
async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<TransactionRecord>, ApiError> {
    state
        .store
        .find_transaction(transaction_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Transaction {transaction_id}")).into())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{app, create_account, send};
    use axum::http::StatusCode;
    use rstest::rstest;
    use serde_json::json;

    #[tokio::test]
    async fn test_post_and_fetch_transaction() {
        let app = app();
        let cash = create_account(&app, "1000", "Cash", "asset").await;
        let sales = create_account(&app, "4000", "Sales", "revenue").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/transactions",
            Some(json!({
                "date": "2026-01-15",
                "description": "Cash sale",
                "items": [
                    { "account_id": cash, "debit": "100.00" },
                    { "account_id": sales, "credit": 100 }
                ]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let id = body["id"].as_i64().unwrap();

        let (status, body) = send(&app, "GET", &format!("/api/v1/transactions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2026-01-15");
        assert_eq!(body["description"], "Cash sale");
        assert_eq!(body["lines"][0]["debit"], "100.00");
        assert_eq!(body["lines"][1]["credit"], "100.00");
    }

    #[tokio::test]
    async fn test_unbalanced_transaction_reports_totals() {
        let app = app();
        let cash = create_account(&app, "1000", "Cash", "asset").await;
        let sales = create_account(&app, "4000", "Sales", "revenue").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/transactions",
            Some(json!({
                "description": "Short",
                "items": [
                    { "account_id": cash, "debit": "100.00", "credit": "0" },
                    { "account_id": sales, "debit": "0", "credit": "90.00" }
                ]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "UNBALANCED_TRANSACTION");
        assert_eq!(body["details"]["total_debit"], "100.00");
        assert_eq!(body["details"]["total_credit"], "90.00");

        let (_, trial) = send(&app, "GET", "/api/v1/report/trial-balance", None).await;
        assert_eq!(trial, json!([]));
    }

    #[tokio::test]
    async fn test_single_line_is_structural_error() {
        let app = app();
        let cash = create_account(&app, "1000", "Cash", "asset").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/transactions",
            Some(json!({
                "description": "Lonely",
                "items": [{ "account_id": cash, "debit": "10.00" }]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "STRUCTURAL_ERROR");
    }

    #[rstest]
    #[case::missing_description(json!({
        "items": [{ "account_id": 1, "debit": "5" }, { "account_id": 2, "credit": "5" }]
    }))]
    #[case::missing_items(json!({ "description": "No lines" }))]
    #[case::non_decimal_debit(json!({
        "description": "Words",
        "items": [{ "account_id": 1, "debit": "five" }, { "account_id": 2, "credit": "5" }]
    }))]
    #[tokio::test]
    async fn test_malformed_body_is_structural_error(#[case] payload: serde_json::Value) {
        let app = app();
        create_account(&app, "1000", "Cash", "asset").await;
        create_account(&app, "4000", "Sales", "revenue").await;

        let (status, body) = send(&app, "POST", "/api/v1/transactions", Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "STRUCTURAL_ERROR");
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|m| m.starts_with("Malformed transaction")),
            "{body}"
        );

        let (_, trial) = send(&app, "GET", "/api/v1/report/trial-balance", None).await;
        assert_eq!(trial, json!([]));
    }

    #[tokio::test]
    async fn test_unknown_account_is_unprocessable() {
        let app = app();
        let cash = create_account(&app, "1000", "Cash", "asset").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/transactions",
            Some(json!({
                "description": "Typo",
                "items": [
                    { "account_id": cash, "debit": "5" },
                    { "account_id": 77, "credit": "5" }
                ]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "UNKNOWN_ACCOUNT");
        assert_eq!(body["details"]["account_id"], 77);
    }

    #[tokio::test]
    async fn test_missing_transaction_is_not_found() {
        let (status, body) = send(&app(), "GET", "/api/v1/transactions/42", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
