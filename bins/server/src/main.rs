//! Maktab API Server
//!
//! Main entry point for the Maktab backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maktab_api::{AppState, create_router};
use maktab_core::archive::{ArchiveConfig, ArchiveProvider, ArchiveService};
use maktab_db::connect;
use maktab_shared::{AppConfig, JwtConfig, JwtService};

fn archive_provider(settings: &maktab_shared::config::StorageSettings) -> ArchiveProvider {
    match settings.provider.as_str() {
        "s3" => ArchiveProvider::s3(
            settings.endpoint.clone(),
            settings.bucket.clone(),
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            settings.region.clone(),
        ),
        _ => ArchiveProvider::local_fs(settings.root.clone()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maktab=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url, config.database.max_connections).await?;
    info!("Connected to database");

    // Create JWT service
    #[allow(clippy::cast_possible_wrap)]
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
    });

    // Create report archive
    let archive = ArchiveService::from_config(ArchiveConfig::new(archive_provider(&config.storage)))
        .map_err(|e| anyhow::anyhow!("Failed to initialize report archive: {e}"))?;
    info!(provider = archive.provider_name(), "Report archive configured");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        archive: Arc::new(archive),
        cron_secret: config.cron.secret.clone(),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
