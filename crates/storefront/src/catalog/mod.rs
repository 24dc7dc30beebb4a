//! Catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`
//! - The catalog is the source of truth for products and articles; the
//!   storefront keeps no copy beyond a short-lived cache
//! - Single products, articles and the site settings are cached in memory
//!   via `moka` (TTL from [`CatalogConfig`]); listings are always fetched
//!   fresh
//!
//! # Endpoints
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | [`CatalogClient::list_products`] | `GET /api/products` | `Page<Product>` |
//! | [`CatalogClient::get_product`] | `GET /api/products/{id}` | `Product` |
//! | [`CatalogClient::list_articles`] | `GET /api/news` | `Page<Article>` |
//! | [`CatalogClient::get_article`] | `GET /api/news/{id}` | `Article` |
//! | [`CatalogClient::get_site`] | `GET /api/site` | `SiteConfig` |
//!
//! Listing endpoints may answer with a bare array or with a paginated
//! envelope; both come back as a [`Page`].

mod cache;

use std::sync::Arc;

use moka::future::Cache;
use mountain_harvest_core::{
    Article, ArticleId, CatalogResponse, Page, Product, ProductId, ProductQuery, SiteConfig,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};

/// Longest slice of an error body kept for diagnostics.
const ERROR_BODY_LIMIT: usize = 200;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    /// The catalog answered with a non-success status.
    #[error("Catalog returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the product and news catalog.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// GET `url` and decode the JSON body.
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.path().to_string()));
        }

        if !status.is_success() {
            error!(
                status = %status,
                url = %url,
                body = %truncate(&body, ERROR_BODY_LIMIT),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                url = %url,
                body = %truncate(&body, ERROR_BODY_LIMIT),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get one page of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Page<Product>, CatalogError> {
        let mut url = self.endpoint("api/products")?;
        url.query_pairs_mut().extend_pairs(query.to_pairs());

        let response: CatalogResponse<Product> = self.fetch(url).await?;
        let page = response.into_page();

        debug!(
            items = page.items.len(),
            total = page.total,
            "Fetched products"
        );
        Ok(page)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&format!("api/products/{id}"))?;
        let product: Product = self.fetch(url).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Article Methods
    // =========================================================================

    /// Get one page of news articles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_articles(&self, page: u32, limit: u32) -> Result<Page<Article>, CatalogError> {
        let mut url = self.endpoint("api/news")?;
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string())
            .append_pair(
                "limit",
                &limit.clamp(1, ProductQuery::MAX_LIMIT).to_string(),
            );

        let response: CatalogResponse<Article> = self.fetch(url).await?;
        Ok(response.into_page())
    }

    /// Get an article by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the article is not found or the request fails.
    #[instrument(skip(self), fields(article_id = %id))]
    pub async fn get_article(&self, id: ArticleId) -> Result<Article, CatalogError> {
        let cache_key = CacheKey::Article(id);

        if let Some(CacheValue::Article(article)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for article");
            return Ok(*article);
        }

        let url = self.endpoint(&format!("api/news/{id}"))?;
        let article: Article = self.fetch(url).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Article(Box::new(article.clone())))
            .await;

        Ok(article)
    }

    /// Get the storefront's site settings (hero, categories, brand, contact
    /// details).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a settings
    /// object.
    #[instrument(skip(self))]
    pub async fn get_site(&self) -> Result<SiteConfig, CatalogError> {
        if let Some(CacheValue::Site(site)) = self.inner.cache.get(&CacheKey::Site).await {
            debug!("Cache hit for site settings");
            return Ok(*site);
        }

        let url = self.endpoint("api/site")?;
        let site: SiteConfig = self.fetch(url).await?;

        self.inner
            .cache
            .insert(CacheKey::Site, CacheValue::Site(Box::new(site.clone())))
            .await;

        Ok(site)
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
