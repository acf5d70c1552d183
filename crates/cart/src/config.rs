//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ROCKETSHOES_API_URL` - Catalog API base URL (default: `http://localhost:3333`)
//! - `ROCKETSHOES_API_TOKEN` - Bearer token sent to the catalog API
//! - `ROCKETSHOES_STORAGE_PATH` - File backing the key-value store
//!   (default: `.rocketshoes/storage.json`)
//! - `ROCKETSHOES_STORAGE_KEY` - Key the cart snapshot is stored under
//!   (default: `@RocketShoes:cart`)
//! - `ROCKETSHOES_CURRENCY` - Currency used to format prices (default: `BRL`)
//! - `ROCKETSHOES_PRODUCT_CACHE_TTL_SECS` - Product record cache TTL (default: 300)
//! - `ROCKETSHOES_HTTP_TIMEOUT_SECS` - Catalog request timeout (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use rocket_shoes_core::CurrencyCode;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::storage::keys;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_PATH: &str = ".rocketshoes/storage.json";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Path of the JSON file backing the key-value store
    pub storage_path: PathBuf,
    /// Key the cart snapshot is stored under
    pub storage_key: String,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
}

/// Catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL; `stock/{id}` and `products/{id}` are resolved against it
    pub base_url: Url,
    /// Optional bearer token
    pub api_token: Option<SecretString>,
    /// How long product records stay cached
    pub product_cache_ttl: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("product_cache_ttl", &self.product_cache_ttl)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let storage_path =
            PathBuf::from(get_env_or_default("ROCKETSHOES_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let storage_key = get_env_or_default("ROCKETSHOES_STORAGE_KEY", keys::CART);
        let currency = get_env_or_default("ROCKETSHOES_CURRENCY", CurrencyCode::BRL.code())
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ROCKETSHOES_CURRENCY".to_string(), e.to_string())
            })?;

        Ok(Self {
            catalog,
            storage_path,
            storage_key,
            currency,
        })
    }
}

impl CatalogConfig {
    /// Configuration pointing at `base_url` with default cache and timeout settings.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: None,
            product_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&get_env_or_default("ROCKETSHOES_API_URL", DEFAULT_API_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("ROCKETSHOES_API_URL".to_string(), e))?;

        Ok(Self {
            base_url,
            api_token: get_optional_env("ROCKETSHOES_API_TOKEN").map(SecretString::from),
            product_cache_ttl: Duration::from_secs(get_env_u64(
                "ROCKETSHOES_PRODUCT_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )?),
            request_timeout: Duration::from_secs(get_env_u64(
                "ROCKETSHOES_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, ensuring a trailing slash so relative joins keep the path.
///
/// # Errors
///
/// Returns the parse error message if `raw` is not an absolute http(s) URL.
pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a numeric environment variable with a default value.
fn get_env_u64(key: &str, default: u64) -> Result<u64, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("http://localhost:3333/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/");
        assert_eq!(
            url.join("stock/1").unwrap().as_str(),
            "http://localhost:3333/api/stock/1"
        );
    }

    #[test]
    fn test_parse_base_url_root() {
        let url = parse_base_url("https://api.example.com").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/");
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_catalog_config_defaults() {
        let config = CatalogConfig::new(parse_base_url(DEFAULT_API_URL).unwrap());
        assert_eq!(config.product_cache_ttl, Duration::from_secs(300));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_catalog_config_debug_redacts_token() {
        let mut config = CatalogConfig::new(parse_base_url(DEFAULT_API_URL).unwrap());
        config.api_token = Some(SecretString::from("super_secret_catalog_token"));

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("localhost:3333"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_catalog_token"));
    }
}
