//! Transfer routes: the transaction ledger surface.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use maktab_core::transfer::{NewTransfer, TransferStatus};
use maktab_db::repositories::transfer::TransferRepositoryError;
use maktab_db::repositories::{TransferFilter, TransferRepository};
use maktab_shared::types::{BranchId, StaffId};

/// Creates the transfer routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transfer))
        .route("/transactions", get(list_transfers))
        .route("/transactions/{id}/status", patch(set_transfer_status))
        .route("/transactions/{id}", delete(delete_transfer))
}

/// Request body for creating a transfer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateTransferRequest {
    /// Source branch.
    pub from_branch_id: Uuid,
    /// Destination branch.
    pub to_branch_id: Uuid,
    /// Sending staff member.
    pub from_staff_id: Uuid,
    /// Receiving staff member.
    pub to_staff_id: Uuid,
    /// Transfer amount.
    pub amount: Decimal,
    /// Currency code.
    pub currency: String,
    /// Transfer method label.
    #[serde(default = "default_transfer_method")]
    pub transfer_method: String,
    /// Date the transfer was initiated.
    pub transaction_date: NaiveDate,
    /// Date the transfer was received, if known.
    pub received_date: Option<NaiveDate>,
    /// Initial status: "pending" (default) or "confirmed".
    pub status: Option<String>,
    /// External tracking token.
    pub confirmation_code: Option<String>,
    /// What the money is for.
    pub purpose: String,
    /// Free-form notes.
    pub notes: Option<String>,
}

fn default_transfer_method() -> String {
    "MoneyGram".to_string()
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Requested status: "pending" or "confirmed".
    pub status: String,
}

/// Query parameters for listing transfers.
#[derive(Debug, Deserialize)]
pub struct ListTransfersQuery {
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by date range start.
    pub from: Option<NaiveDate>,
    /// Filter by date range end.
    pub to: Option<NaiveDate>,
    /// Filter by branch on either side.
    #[serde(rename = "branchId")]
    pub branch_id: Option<Uuid>,
}

/// Parses an operator-settable status label.
///
/// Cancellation is modeled on the status enum but not settable here.
fn parse_settable_status(label: &str) -> Option<TransferStatus> {
    match label {
        "pending" => Some(TransferStatus::Pending),
        "confirmed" => Some(TransferStatus::Confirmed),
        _ => None,
    }
}

fn invalid_status_response(label: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_status",
            "message": format!("Status must be 'pending' or 'confirmed', got '{label}'")
        })),
    )
        .into_response()
}

fn repository_error_response(e: &TransferRepositoryError) -> Response {
    match e {
        TransferRepositoryError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Transaction {id} not found")
            })),
        )
            .into_response(),
        TransferRepositoryError::Invalid(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": e.to_string()
            })),
        )
            .into_response(),
        TransferRepositoryError::Budget(_) | TransferRepositoryError::Database(_) => {
            error!(error = %e, "Transfer operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// POST /transactions
#[axum::debug_handler]
async fn create_transfer(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(body): Json<CreateTransferRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth_user.require_admin() {
        return response;
    }

    let status = match body.status.as_deref() {
        None => TransferStatus::Pending,
        Some(label) => match parse_settable_status(label) {
            Some(status) => status,
            None => return invalid_status_response(label),
        },
    };

    let input = NewTransfer {
        from_branch_id: BranchId::from_uuid(body.from_branch_id),
        to_branch_id: BranchId::from_uuid(body.to_branch_id),
        from_staff_id: StaffId::from_uuid(body.from_staff_id),
        to_staff_id: StaffId::from_uuid(body.to_staff_id),
        amount: body.amount,
        currency: body.currency,
        transfer_method: body.transfer_method,
        transaction_date: body.transaction_date,
        received_date: body.received_date,
        status,
        confirmation_code: body.confirmation_code,
        purpose: body.purpose,
        notes: body.notes,
    };

    let repo = TransferRepository::new((*state.db).clone());
    match repo.create(input, Some(auth_user.user_id())).await {
        Ok(transfer) => (StatusCode::CREATED, Json(transfer)).into_response(),
        Err(e) => repository_error_response(&e),
    }
}

/// GET /transactions
#[axum::debug_handler]
async fn list_transfers(
    State(state): State<AppState>,
    Query(query): Query<ListTransfersQuery>,
    _auth_user: AuthUser,
) -> impl IntoResponse {
    let status = match query.status.as_deref() {
        None => None,
        Some(label) => match parse_settable_status(label) {
            Some(status) => Some(status.into()),
            None => return invalid_status_response(label),
        },
    };

    let filter = TransferFilter {
        status,
        date_from: query.from,
        date_to: query.to,
        branch_id: query.branch_id,
    };

    let repo = TransferRepository::new((*state.db).clone());
    match repo.list(&filter).await {
        Ok(transfers) => (StatusCode::OK, Json(transfers)).into_response(),
        Err(e) => repository_error_response(&e),
    }
}

/// PATCH /transactions/{id}/status
#[axum::debug_handler]
async fn set_transfer_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
    Json(body): Json<SetStatusRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth_user.require_admin() {
        return response;
    }

    let Some(status) = parse_settable_status(&body.status) else {
        return invalid_status_response(&body.status);
    };

    let repo = TransferRepository::new((*state.db).clone());
    match repo.set_status(id, status).await {
        Ok(transfer) => (StatusCode::OK, Json(transfer)).into_response(),
        Err(e) => repository_error_response(&e),
    }
}

/// DELETE /transactions/{id}
#[axum::debug_handler]
async fn delete_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    if let Err(response) = auth_user.require_admin() {
        return response;
    }

    let repo = TransferRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => repository_error_response(&e),
    }
}
