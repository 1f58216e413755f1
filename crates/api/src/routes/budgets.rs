//! Branch budget routes.
//!
//! `allocated_amount` is operator-entered; `spent_amount` is derived by the
//! accrual recompute and cannot be written through this surface.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use maktab_core::budget::PeriodKey;
use maktab_db::repositories::{BudgetError, BudgetRepository, CreateBudgetInput, UpdateBudgetInput};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/branch-budgets", post(create_budget))
        .route("/branch-budgets", get(list_budgets))
        .route("/branch-budgets/{id}", put(update_budget))
}

/// Request body for creating a budget.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateBudgetRequest {
    /// Branch the budget belongs to.
    pub branch_id: Uuid,
    /// Budget granularity: "monthly" or "yearly".
    pub budget_period: String,
    /// Calendar year.
    pub year: i32,
    /// Month number, required for monthly budgets.
    pub month: Option<u32>,
    /// Operator-entered allocation.
    pub allocated_amount: Decimal,
    /// Currency code.
    pub currency: String,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Request body for updating a budget.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateBudgetRequest {
    /// New allocation.
    pub allocated_amount: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

fn period_key_from_request(body: &CreateBudgetRequest) -> Result<PeriodKey, Response> {
    match body.budget_period.as_str() {
        "monthly" => match body.month {
            Some(month) => Ok(PeriodKey::Monthly {
                year: body.year,
                month,
            }),
            None => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation_error",
                    "message": "Month is required for monthly budgets"
                })),
            )
                .into_response()),
        },
        "yearly" => Ok(PeriodKey::Yearly { year: body.year }),
        other => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": format!("Budget period must be 'monthly' or 'yearly', got '{other}'")
            })),
        )
            .into_response()),
    }
}

fn budget_error_response(e: &BudgetError) -> Response {
    match e {
        BudgetError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Budget {id} not found")
            })),
        )
            .into_response(),
        BudgetError::Duplicate => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "conflict",
                "message": e.to_string()
            })),
        )
            .into_response(),
        BudgetError::NegativeAllocation
        | BudgetError::CurrencyRequired
        | BudgetError::InvalidMonth(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": e.to_string()
            })),
        )
            .into_response(),
        BudgetError::Database(_) => {
            error!(error = %e, "Budget operation failed");
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

/// POST /branch-budgets
#[axum::debug_handler]
async fn create_budget(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(body): Json<CreateBudgetRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth_user.require_admin() {
        return response;
    }

    let period = match period_key_from_request(&body) {
        Ok(period) => period,
        Err(response) => return response,
    };

    let repo = BudgetRepository::new((*state.db).clone());
    let input = CreateBudgetInput {
        branch_id: body.branch_id,
        period,
        allocated_amount: body.allocated_amount,
        currency: body.currency,
        notes: body.notes,
    };

    match repo.create_budget(input).await {
        Ok(budget) => (StatusCode::CREATED, Json(budget)).into_response(),
        Err(e) => budget_error_response(&e),
    }
}

/// GET /branch-budgets
#[axum::debug_handler]
async fn list_budgets(State(state): State<AppState>, _auth_user: AuthUser) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo.list_budgets().await {
        Ok(budgets) => (StatusCode::OK, Json(budgets)).into_response(),
        Err(e) => budget_error_response(&e),
    }
}

/// PUT /branch-budgets/{id}
#[axum::debug_handler]
async fn update_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
    Json(body): Json<UpdateBudgetRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth_user.require_admin() {
        return response;
    }

    let repo = BudgetRepository::new((*state.db).clone());
    let input = UpdateBudgetInput {
        allocated_amount: body.allocated_amount,
        notes: body.notes.map(Some),
    };

    match repo.update_budget(id, input).await {
        Ok(budget) => (StatusCode::OK, Json(budget)).into_response(),
        Err(e) => budget_error_response(&e),
    }
}
