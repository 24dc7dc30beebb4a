//! Application state shared across commands.

use std::sync::Arc;

use mountain_harvest_core::{ProductId, format_currency};
use tracing::{info, instrument};

use crate::cart::{CartItem, CartStorage, CartStore, FileStorage};
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};

/// Application state shared across all commands.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the catalog client. The cart is not part of it:
/// a [`CartStore`] has a single owner, opened with [`AppState::open_cart`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Open the shopper's cart from the configured directory.
    #[must_use]
    pub fn open_cart(&self) -> CartStore<FileStorage> {
        CartStore::open(FileStorage::new(&self.inner.config.cart_dir))
    }

    /// Format an amount in minor units for the configured locale and currency.
    #[must_use]
    pub fn format_price(&self, amount: u64) -> String {
        let config = &self.inner.config;
        format_currency(amount, config.currency, config.locale)
    }

    /// Look a product up in the catalog and add it to `cart`.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for a zero quantity, or the catalog error if the
    /// product cannot be fetched. The cart is untouched in both cases.
    #[instrument(skip(self, cart), fields(product_id = %id))]
    pub async fn add_to_cart<S: CartStorage>(
        &self,
        cart: &mut CartStore<S>,
        id: ProductId,
        quantity: u32,
    ) -> Result<()> {
        if quantity == 0 {
            return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
        }

        let product = self.catalog().get_product(id).await?;
        info!(name = %product.name, quantity, "Adding product to cart");
        cart.add_item(CartItem::from(product), quantity);
        Ok(())
    }
}
