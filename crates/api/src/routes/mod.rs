//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod branches;
pub mod budgets;
pub mod health;
pub mod reports;
pub mod scheduler;
pub mod transfers;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require a bearer token
    let protected_routes = Router::new()
        .merge(transfers::routes())
        .merge(budgets::routes())
        .merge(branches::routes())
        .merge(reports::registry_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // The generation endpoint and the scheduler validate their own trust
    // path (bearer token or cron shared secret), so they sit outside the
    // JWT middleware group.
    Router::new()
        .merge(health::routes())
        .merge(reports::generation_routes())
        .merge(scheduler::routes())
        .merge(protected_routes)
}
