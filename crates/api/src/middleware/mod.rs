//! Request middleware.

pub mod auth;

pub use auth::{AuthUser, auth_middleware, cron_secret_matches};
