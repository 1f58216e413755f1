//! Branch routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser};
use maktab_db::BranchRepository;

/// Creates the branch routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/branches", get(list_branches))
}

/// GET /branches
#[axum::debug_handler]
async fn list_branches(State(state): State<AppState>, _auth_user: AuthUser) -> impl IntoResponse {
    let repo = BranchRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(branches) => (StatusCode::OK, Json(branches)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list branches");
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
