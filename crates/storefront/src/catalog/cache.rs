//! Cache types for catalog responses.

use mountain_harvest_core::{Article, ArticleId, Product, ProductId, SiteConfig};

/// Cache key for single catalog entries.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Article(ArticleId),
    Site,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Article(Box<Article>),
    Site(Box<SiteConfig>),
}
