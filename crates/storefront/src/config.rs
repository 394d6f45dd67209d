//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `QUICKCART_CATALOG_URL` - Product listing endpoint (default: <https://dummyjson.com/products>)
//! - `QUICKCART_STORAGE_PATH` - Local store file (default: `.quickcart/local_storage.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., `development`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default product listing endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products";

/// Default location of the local store.
pub const DEFAULT_STORAGE_PATH: &str = ".quickcart/local_storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Product catalog configuration
    pub catalog: CatalogConfig,
    /// Path of the local key-value store file
    pub storage_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Product catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Product listing endpoint
    pub endpoint: Url,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_CATALOG_URL)
                .unwrap_or_else(|_| unreachable!("default catalog URL is valid")),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog = CatalogConfig::from_lookup(&lookup)?;
        let storage_path = non_empty(lookup("QUICKCART_STORAGE_PATH"))
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        Ok(Self {
            catalog,
            storage_path,
            sentry_dsn: non_empty(lookup("SENTRY_DSN")),
            sentry_environment: non_empty(lookup("SENTRY_ENVIRONMENT")),
        })
    }
}

impl CatalogConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let Some(raw) = non_empty(lookup("QUICKCART_CATALOG_URL")) else {
            return Ok(Self::default());
        };

        let endpoint = Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidEnvVar("QUICKCART_CATALOG_URL".to_string(), e.to_string())
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "QUICKCART_CATALOG_URL".to_string(),
                format!("unsupported scheme '{}'", endpoint.scheme()),
            ));
        }

        Ok(Self { endpoint })
    }
}

/// Treat empty or whitespace-only values as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
