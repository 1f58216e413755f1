//! Report generation and registry routes.
//!
//! `POST /generate-monthly-reports` accepts two trust paths: an admin bearer
//! token (interactive use) or the cron shared secret (scheduled use). The
//! generation pipeline itself is shared with the scheduler via
//! `run_generation`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};
use uuid::Uuid;

use crate::middleware::auth::extract_bearer_token;
use crate::{AppState, middleware::AuthUser, middleware::cron_secret_matches};
use maktab_core::archive::ArchiveService;
use maktab_core::reports::{
    ReportEntry, ReportError, ReportPeriod, ReportTotals, ResolvedPeriod, layout, pdf,
};
use maktab_db::entities::generated_reports;
use maktab_db::repositories::report::ReportRegistryError;
use maktab_db::repositories::transfer::TransferRepositoryError;
use maktab_db::repositories::{
    BranchRepository, NewReportEntry, ReportRepository, TransferRepository, TransferWithNames,
};

/// Creates the self-authenticating generation route.
pub fn generation_routes() -> Router<AppState> {
    Router::new().route("/generate-monthly-reports", post(generate_report))
}

/// Creates the registry routes (requires auth middleware to be applied externally).
pub fn registry_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(list_reports))
        .route("/reports/{id}", get(get_report))
        .route("/reports/{id}/download", get(download_report))
        .route("/reports/{id}", delete(delete_report))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for report generation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    /// Scoped branch; `None` means all branches combined.
    pub branch_id: Option<Uuid>,
    /// Period mode: "single", "yearly", or "range". Defaults to the previous
    /// calendar month when absent.
    pub report_type: Option<String>,
    /// Year for single/yearly mode.
    pub year: Option<i32>,
    /// Month for single mode.
    pub month: Option<u32>,
    /// Range start year.
    pub start_year: Option<i32>,
    /// Range start month.
    pub start_month: Option<u32>,
    /// Range end year.
    pub end_year: Option<i32>,
    /// Range end month.
    pub end_month: Option<u32>,
    /// Scheduled-run marker: no-data becomes a skip instead of an error.
    #[serde(default)]
    pub is_automated: bool,
}

// ============================================================================
// Generation Pipeline
// ============================================================================

/// Errors from the generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The selection was empty.
    #[error("No transactions found for this period")]
    NoData,

    /// Period resolution or rendering failure.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Ledger read failure.
    #[error(transparent)]
    Transfers(#[from] TransferRepositoryError),

    /// Registry write failure.
    #[error(transparent)]
    Registry(#[from] ReportRegistryError),

    /// Artifact upload failure.
    #[error(transparent)]
    Storage(#[from] maktab_core::archive::StorageError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl GenerationError {
    /// Returns true if this is the empty-selection condition.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

fn to_report_entry(row: &TransferWithNames) -> ReportEntry {
    let status: maktab_core::transfer::TransferStatus = row.transfer.status.into();
    ReportEntry {
        transaction_date: row.transfer.transaction_date,
        from_branch: row.from_branch.clone(),
        to_branch: row.to_branch.clone(),
        from_staff: row.from_staff.clone(),
        to_staff: row.to_staff.clone(),
        confirmation_code: row.transfer.confirmation_code.clone(),
        amount: row.transfer.amount,
        currency: row.transfer.currency.clone(),
        status: status.as_str().to_string(),
    }
}

/// Runs the full generation pipeline for one scope and period.
///
/// Select → layout → render → upload → registry upsert. If the registry
/// write fails after a successful upload, the uploaded artifact is deleted
/// again so no orphaned object masquerades as a completed report.
pub(crate) async fn run_generation(
    state: &AppState,
    scope: Option<Uuid>,
    period: &ResolvedPeriod,
    generated_by: Option<Uuid>,
) -> Result<generated_reports::Model, GenerationError> {
    let transfers = TransferRepository::new((*state.db).clone());
    let rows = transfers
        .list_for_report(period.start_date, period.end_date, scope)
        .await?;

    if rows.is_empty() {
        return Err(GenerationError::NoData);
    }

    let branch_name = match scope {
        None => "All Branches".to_string(),
        Some(branch_id) => {
            BranchRepository::new((*state.db).clone())
                .display_name(branch_id)
                .await?
        }
    };

    let entries: Vec<ReportEntry> = rows.iter().map(to_report_entry).collect();
    let totals = ReportTotals::from_entries(&entries);

    let generated_on = Utc::now().format("%d/%m/%Y, %H:%M:%S").to_string();
    let pages = layout::plan_document(
        &entries,
        &branch_name,
        &period.description,
        &totals,
        &generated_on,
    );
    let bytes = pdf::render("Monthly Transaction Report", &pages)?;

    let file_name = ArchiveService::report_file_name(&period.label, &branch_name);
    let file_path = ArchiveService::report_key(&period.label, &branch_name);
    let file_size = i64::try_from(bytes.len()).unwrap_or(i64::MAX);

    state.archive.store(&file_path, bytes).await?;

    let (currency, total_amount) = totals
        .primary()
        .map_or(("AFN".to_string(), Decimal::ZERO), |(c, t)| {
            (c.to_string(), t)
        });

    let entry = NewReportEntry {
        branch_id: scope,
        report_type: period.mode.to_string(),
        report_period: period.label.clone(),
        file_name,
        file_path: file_path.clone(),
        file_size,
        transaction_count: i32::try_from(entries.len()).unwrap_or(i32::MAX),
        total_amount,
        currency,
        generated_by,
    };

    let reports = ReportRepository::new((*state.db).clone());
    match reports.upsert(entry).await {
        Ok(report) => Ok(report),
        Err(e) => {
            // Compensating action: the artifact was uploaded but never
            // registered, so remove it before surfacing the failure.
            if let Err(cleanup) = state.archive.delete(&file_path).await {
                warn!(error = %cleanup, path = %file_path, "Failed to clean up orphaned report artifact");
            }
            Err(e.into())
        }
    }
}

/// Resolves the requested period, defaulting to the previous calendar month.
fn resolve_period(body: &GenerateReportRequest) -> Result<ResolvedPeriod, Response> {
    let missing = |message: &str| {
        Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message })),
        )
            .into_response())
    };

    let period = match body.report_type.as_deref() {
        Some("single") => match (body.year, body.month) {
            (Some(year), Some(month)) => ReportPeriod::Single { year, month },
            _ => return missing("Year and month are required for single reports"),
        },
        Some("yearly") => match body.year {
            Some(year) => ReportPeriod::Yearly { year },
            None => return missing("Year is required for yearly reports"),
        },
        Some("range") => match (body.start_year, body.start_month, body.end_year, body.end_month) {
            (Some(start_year), Some(start_month), Some(end_year), Some(end_month)) => {
                ReportPeriod::Range {
                    start_year,
                    start_month,
                    end_year,
                    end_month,
                }
            }
            _ => return missing("Start and end year/month are required for range reports"),
        },
        _ => ReportPeriod::previous_month(Utc::now().date_naive()),
    };

    period.resolve().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response()
    })
}

/// Validates the dual trust path for the generation endpoint.
///
/// Returns the triggering identity: `None` for the cron path, the admin's
/// user id for the bearer path.
fn authenticate_generation(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Uuid>, Response> {
    if cron_secret_matches(headers, &state.cron_secret) {
        return Ok(None);
    }

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    let Some(token) = token else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Missing authorization header" })),
        )
            .into_response());
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) if claims.is_admin() => Ok(Some(claims.user_id())),
        Ok(_) => Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin role required" })),
        )
            .into_response()),
        Err(_) => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response()),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /generate-monthly-reports
#[axum::debug_handler]
async fn generate_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<GenerateReportRequest>,
) -> impl IntoResponse {
    let generated_by = match authenticate_generation(&state, &headers) {
        Ok(generated_by) => generated_by,
        Err(response) => return response,
    };

    let period = match resolve_period(&body) {
        Ok(period) => period,
        Err(response) => return response,
    };

    match run_generation(&state, body.branch_id, &period, generated_by).await {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({ "success": true, "report": report })),
        )
            .into_response(),
        Err(e) if e.is_no_data() && body.is_automated => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "No transactions found for this period",
                "skipped": true
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Report generation failed");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

fn registry_error_response(e: &ReportRegistryError) -> Response {
    match e {
        ReportRegistryError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Report {id} not found")
            })),
        )
            .into_response(),
        ReportRegistryError::Database(_) => {
            error!(error = %e, "Report registry operation failed");
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

/// GET /reports
#[axum::debug_handler]
async fn list_reports(State(state): State<AppState>, _auth_user: AuthUser) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(reports) => (StatusCode::OK, Json(reports)).into_response(),
        Err(e) => registry_error_response(&e),
    }
}

/// GET /reports/{id}
#[axum::debug_handler]
async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _auth_user: AuthUser,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => registry_error_response(&e),
    }
}

/// GET /reports/{id}/download
#[axum::debug_handler]
async fn download_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _auth_user: AuthUser,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());

    let report = match repo.get(id).await {
        Ok(report) => report,
        Err(e) => return registry_error_response(&e),
    };

    match state.archive.read(&report.file_path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", report.file_name),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, path = %report.file_path, "Failed to read report artifact");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "storage_error",
                    "message": "Failed to read report artifact"
                })),
            )
                .into_response()
        }
    }
}

/// DELETE /reports/{id}
///
/// Deletes the artifact first, then the registry row. A failed artifact
/// delete still removes the row: the registry decides whether a report
/// exists, and an orphaned blob is a cheap leak rather than a correctness
/// problem.
#[axum::debug_handler]
async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    if let Err(response) = auth_user.require_admin() {
        return response;
    }

    let repo = ReportRepository::new((*state.db).clone());

    let report = match repo.get(id).await {
        Ok(report) => report,
        Err(e) => return registry_error_response(&e),
    };

    if let Err(e) = state.archive.delete(&report.file_path).await {
        warn!(error = %e, path = %report.file_path, "Failed to delete report artifact; removing registry row anyway");
    }

    match repo.delete(id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => registry_error_response(&e),
    }
}
