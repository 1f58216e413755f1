//! Scheduled report generation.
//!
//! A periodic trigger (machine-to-machine, cron shared secret) fans out over
//! the all-branches pseudo-scope plus every branch, generating last month's
//! report for each. One scope failing never aborts the remaining scopes; the
//! response carries one result entry per scope.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{error, info};
use uuid::Uuid;

use crate::routes::reports::run_generation;
use crate::{AppState, middleware::cron_secret_matches};
use maktab_core::reports::{ReportPeriod, ResolvedPeriod};
use maktab_db::BranchRepository;

/// Creates the scheduler route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/monthly-report-scheduler", post(run_scheduler))
}

/// Generates one scope's report and folds the outcome into a result entry.
async fn scope_result(
    state: &AppState,
    branch_name: &str,
    scope: Option<Uuid>,
    period: &ResolvedPeriod,
) -> Value {
    match run_generation(state, scope, period, None).await {
        Ok(report) => json!({
            "branch": branch_name,
            "success": true,
            "report": report,
        }),
        Err(e) if e.is_no_data() => json!({
            "branch": branch_name,
            "success": true,
            "message": "No transactions found for this period",
            "skipped": true,
        }),
        Err(e) => {
            error!(error = %e, branch = %branch_name, "Scheduled report generation failed");
            json!({
                "branch": branch_name,
                "success": false,
                "error": e.to_string(),
            })
        }
    }
}

/// POST /monthly-report-scheduler
#[axum::debug_handler]
async fn run_scheduler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if !cron_secret_matches(&headers, &state.cron_secret) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized: Invalid cron secret" })),
        )
            .into_response();
    }

    // Default scope: the calendar month preceding the trigger time.
    let today = Utc::now().date_naive();
    let period = match ReportPeriod::previous_month(today).resolve() {
        Ok(period) => period,
        Err(e) => {
            error!(error = %e, "Failed to resolve scheduler period");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let branches = match BranchRepository::new((*state.db).clone()).list().await {
        Ok(branches) => branches,
        Err(e) => {
            error!(error = %e, "Failed to fetch branches");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    info!(
        period = %period.label,
        branch_count = branches.len(),
        "Running scheduled report generation"
    );

    let mut results = Vec::with_capacity(branches.len() + 1);
    results.push(scope_result(&state, "All Branches", None, &period).await);

    for branch in &branches {
        results.push(scope_result(&state, &branch.name, Some(branch.id), &period).await);
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Monthly reports generation completed",
            "results": results,
        })),
    )
        .into_response()
}
