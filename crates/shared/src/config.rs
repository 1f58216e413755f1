//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Scheduled report generation configuration.
    pub cron: CronConfig,
    /// Report archive storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for validating tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Configuration for the machine-to-machine scheduler trust boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct CronConfig {
    /// Shared secret expected in the `X-Cron-Secret` header.
    pub secret: String,
}

/// Report archive storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage provider: "s3" or "fs".
    #[serde(default = "default_storage_provider")]
    pub provider: String,
    /// Bucket name (s3 provider).
    #[serde(default)]
    pub bucket: String,
    /// Endpoint URL (s3 provider).
    #[serde(default)]
    pub endpoint: String,
    /// Region (s3 provider).
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key id (s3 provider).
    #[serde(default)]
    pub access_key_id: String,
    /// Secret access key (s3 provider).
    #[serde(default)]
    pub secret_access_key: String,
    /// Root directory (fs provider).
    #[serde(default = "default_storage_root")]
    pub root: String,
}

fn default_storage_provider() -> String {
    "fs".to_string()
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_storage_root() -> String {
    "./reports".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: default_storage_provider(),
            bucket: String::new(),
            endpoint: String::new(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            root: default_storage_root(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MAKTAB").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
