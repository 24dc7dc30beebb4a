//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything above the cart: loading
//! configuration, talking to the catalog, and validating user input. The cart
//! itself never fails; see [`crate::cart`].

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Bad request from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// Follows the BSD `sysexits.h` convention.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::BadRequest(_) => 64,
            Self::Catalog(CatalogError::NotFound(_)) => 66,
            Self::Catalog(_) => 69,
            Self::Config(_) => 78,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
