//! Integration tests for Mountain Harvest.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mountain-harvest-integration-tests
//! ```
//!
//! Nothing external is needed: the catalog is served by a `wiremock`
//! server started per test, and carts are written to throwaway
//! directories under the system temp dir.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart snapshots on disk across store reopen
//! - `catalog_client` - Catalog client against a mock HTTP API

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use mountain_harvest_storefront::config::{ConfigError, StorefrontConfig};
use mountain_harvest_storefront::state::AppState;
use uuid::Uuid;

/// A unique directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempCartDir {
    path: PathBuf,
}

impl TempCartDir {
    /// Pick a fresh path. The directory itself is created by the first save.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("mountain-harvest-it-{}", Uuid::new_v4())),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TempCartDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempCartDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Configuration pointing at `catalog_url` and storing carts in `cart_dir`.
///
/// # Errors
///
/// Returns an error if `catalog_url` is not a valid http(s) URL.
pub fn test_config(catalog_url: &str, cart_dir: &Path) -> Result<StorefrontConfig, ConfigError> {
    let vars = HashMap::from([
        ("CATALOG_BASE_URL", catalog_url.to_string()),
        ("CATALOG_TIMEOUT_SECS", "5".to_string()),
        ("STOREFRONT_CART_DIR", cart_dir.display().to_string()),
    ]);
    StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
}

/// Application state for a test, with Vietnamese formatting in VND.
///
/// # Panics
///
/// Panics if the configuration or the catalog client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_state(catalog_url: &str, cart_dir: &Path) -> AppState {
    let config = test_config(catalog_url, cart_dir).expect("test configuration should be valid");
    AppState::new(config).expect("catalog client should build")
}
