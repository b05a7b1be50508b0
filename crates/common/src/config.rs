//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Identity token verification configuration.
    pub auth: AuthConfig,
    /// File storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Automatic photo import configuration.
    #[serde(default)]
    pub photo_import: PhotoImportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Identity token verification configuration.
///
/// Tokens are issued by the external identity provider; this service only
/// verifies them and reads the email and role claims.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret for token verification.
    pub token_secret: String,
    /// Expected token issuer, if the provider sets one.
    #[serde(default)]
    pub issuer: Option<String>,
}

/// File storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Base path for locally stored files.
    #[serde(default = "default_storage_path")]
    pub base_path: String,
    /// Base URL under which stored files are served.
    #[serde(default = "default_storage_url")]
    pub base_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            base_path: default_storage_path(),
            base_url: default_storage_url(),
        }
    }
}

/// Automatic photo import settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoImportConfig {
    /// Whether the weekly import job runs.
    #[serde(default)]
    pub enabled: bool,
    /// Image search API endpoint.
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,
    /// Image search API access key.
    #[serde(default)]
    pub access_key: Option<String>,
    /// Sites with fewer image rows than this are topped up.
    #[serde(default = "default_photo_threshold")]
    pub min_photos_per_site: u64,
    /// Candidate photos requested per site.
    #[serde(default = "default_photos_per_query")]
    pub photos_per_query: u8,
}

impl Default for PhotoImportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            search_endpoint: default_search_endpoint(),
            access_key: None,
            min_photos_per_site: default_photo_threshold(),
            photos_per_query: default_photos_per_query(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

fn default_storage_path() -> String {
    "./files".to_string()
}

fn default_storage_url() -> String {
    "/files".to_string()
}

fn default_search_endpoint() -> String {
    "https://api.unsplash.com/search/photos".to_string()
}

const fn default_photo_threshold() -> u64 {
    5
}

const fn default_photos_per_query() -> u8 {
    3
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `VIRASAT_ENV`)
    /// 3. Environment variables with `VIRASAT_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("VIRASAT_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("VIRASAT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("VIRASAT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
