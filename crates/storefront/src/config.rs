//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CATALOG_BASE_URL` - Catalog API root (default: `http://localhost:5001`)
//! - `CATALOG_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `CATALOG_CACHE_TTL_SECS` - How long single products and articles stay
//!   cached (default: 300)
//! - `STOREFRONT_CART_DIR` - Directory holding the persisted cart
//!   (default: `.mountain-harvest`)
//! - `STOREFRONT_LOCALE` - `vi` or `en` (default: `vi`)
//! - `STOREFRONT_CURRENCY` - `VND` or `USD` (default: `VND`)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use mountain_harvest_core::{CurrencyCode, Locale};
use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_BASE_URL: &str = "http://localhost:5001";
const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_CACHE_TTL_SECS: &str = "300";
const DEFAULT_CART_DIR: &str = ".mountain-harvest";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory the cart snapshot is persisted in
    pub cart_dir: PathBuf,
    /// Display locale for prices
    pub locale: Locale,
    /// Currency catalog prices are denominated in
    pub currency: CurrencyCode,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root; always ends in `/` so endpoint paths join beneath it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Lifetime of cached single-entry lookups
    pub cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let catalog = CatalogConfig {
            base_url: parse_base_url(
                "CATALOG_BASE_URL",
                &env.or_default("CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL),
            )?,
            timeout: Duration::from_secs(
                env.parse_or_default("CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            ),
            cache_ttl: Duration::from_secs(
                env.parse_or_default("CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            ),
        };

        Ok(Self {
            catalog,
            cart_dir: PathBuf::from(env.or_default("STOREFRONT_CART_DIR", DEFAULT_CART_DIR)),
            locale: env.parse_or_default("STOREFRONT_LOCALE", "vi")?,
            currency: env.parse_or_default("STOREFRONT_CURRENCY", "VND")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get a variable, treating blank values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

/// Parse an http(s) URL and make sure its path ends in `/`.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar(key.to_string(), msg);

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
