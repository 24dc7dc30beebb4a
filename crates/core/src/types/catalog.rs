//! Catalog types served by the product and news API.
//!
//! The catalog answers either with a bare JSON array or with a paginated
//! envelope (`{items, total, page, limit, totalPages}`). [`CatalogResponse`]
//! accepts both so callers always work with a [`Page`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::id::{ArticleId, ProductId};
use super::tags::Tags;

/// Errors that can occur when parsing catalog query parameters.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Not one of `under50`, `50-200`, `over200`.
    #[error("unknown price band: {0}")]
    UnknownPriceBand(String),
    /// Not one of `newest`, `bestseller`, `price_asc`, `price_desc`.
    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),
}

/// Treat an explicit JSON `null` like a missing field.
///
/// For use with `#[serde(default, deserialize_with = "...")]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Products
// =============================================================================

/// A product as served by the catalog.
///
/// Prices are integers in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    pub price: u64,
    #[serde(default, rename = "originalPrice", alias = "original_price")]
    pub original_price: Option<u64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: u32,
    #[serde(
        default,
        rename = "isHot",
        alias = "is_hot",
        deserialize_with = "null_as_default"
    )]
    pub is_hot: bool,
    #[serde(default)]
    pub discount: Option<String>,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl Product {
    /// Markdown from the original price, rounded to the nearest percent.
    ///
    /// `None` when there is no original price or it is not above the
    /// current price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u8> {
        let original = self.original_price.filter(|&o| o > self.price)?;
        let off = u128::from(original - self.price) * 100;
        let percent = (off + u128::from(original) / 2) / u128::from(original);
        u8::try_from(percent).ok()
    }
}

// =============================================================================
// Articles
// =============================================================================

/// A news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    /// Publication date exactly as the catalog serves it.
    #[serde(default)]
    pub date: Option<String>,
}

// =============================================================================
// Site settings
// =============================================================================

/// Storefront-wide settings: hero banner, categories, brand and contact
/// details.
///
/// Every section may be missing or `null`; absent sections decode empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hero: Hero,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brochures: Vec<Brochure>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: Brand,
    /// Older name for `brand`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub header: Brand,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topbar: Topbar,
    #[serde(default, deserialize_with = "null_as_default")]
    pub footer: Footer,
}

impl SiteConfig {
    /// The brand block, falling back to `header` when `brand` is empty.
    #[must_use]
    pub fn brand(&self) -> &Brand {
        if self.brand.is_empty() {
            &self.header
        } else {
            &self.brand
        }
    }
}

/// Home page hero banner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    pub promo: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub button_text: Option<String>,
}

/// A promoted category tile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Brochure {
    pub slug: String,
    pub title: String,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub button_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Brand {
    pub site_name: Option<String>,
    pub tagline: Option<String>,
    /// Icon class, e.g. `fas fa-mountain`.
    pub icon: Option<String>,
}

impl Brand {
    pub const DEFAULT_ICON: &'static str = "fas fa-mountain";

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.site_name.is_none() && self.tagline.is_none() && self.icon.is_none()
    }

    /// The icon class, trimmed, or [`Self::DEFAULT_ICON`].
    #[must_use]
    pub fn icon(&self) -> &str {
        self.icon
            .as_deref()
            .map(str::trim)
            .filter(|icon| !icon.is_empty())
            .unwrap_or(Self::DEFAULT_ICON)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Topbar {
    pub free_shipping: Option<String>,
    pub hotline: Option<String>,
    pub support: Option<String>,
}

/// Contact details shown in the footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Wrap an unpaginated list as the only page.
    #[must_use]
    pub fn single(items: Vec<T>) -> Self {
        let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Self {
            total: u64::from(len),
            page: 1,
            limit: len.max(1),
            total_pages: 1,
            items,
        }
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A catalog listing response: a paginated envelope or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogResponse<T> {
    Page(Page<T>),
    List(Vec<T>),
}

impl<T> CatalogResponse<T> {
    /// Normalise into a [`Page`].
    #[must_use]
    pub fn into_page(self) -> Page<T> {
        match self {
            Self::Page(page) => page,
            Self::List(items) => Page::single(items),
        }
    }
}

// =============================================================================
// Server-side query
// =============================================================================

/// Price bands understood by the product endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBand {
    /// Below 50,000.
    #[serde(rename = "under50")]
    Under50,
    /// 50,000 to 200,000 inclusive.
    #[serde(rename = "50-200")]
    From50To200,
    /// Above 200,000.
    #[serde(rename = "over200")]
    Over200,
}

impl PriceBand {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Under50 => "under50",
            Self::From50To200 => "50-200",
            Self::Over200 => "over200",
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceBand {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "under50" => Ok(Self::Under50),
            "50-200" => Ok(Self::From50To200),
            "over200" => Ok(Self::Over200),
            other => Err(QueryError::UnknownPriceBand(other.to_string())),
        }
    }
}

/// Sort orders understood by the product endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently added first.
    #[default]
    Newest,
    /// Most reviewed first.
    Bestseller,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Bestseller => "bestseller",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "bestseller" => Ok(Self::Bestseller),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            _ => Err(QueryError::UnknownSortOrder(s.to_string())),
        }
    }
}

/// Query parameters for `GET /api/products`.
///
/// `page` is at least 1 and `limit` is kept within `1..=100`, the same
/// bounds the endpoint enforces.
///
/// ```
/// use mountain_harvest_core::{ProductQuery, SortOrder};
///
/// let query = ProductQuery::new().with_limit(500).with_page(0).with_sort(SortOrder::PriceAsc);
/// assert_eq!(query.limit(), 100);
/// assert_eq!(query.page(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    category: Option<String>,
    price: Option<PriceBand>,
    standard: Option<String>,
    sort: SortOrder,
    page: u32,
    limit: u32,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    /// Page size used when none is given.
    pub const DEFAULT_LIMIT: u32 = 8;
    /// Largest page size the endpoint serves.
    pub const MAX_LIMIT: u32 = 100;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            category: None,
            price: None,
            standard: None,
            sort: SortOrder::Newest,
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn with_price_band(mut self, band: PriceBand) -> Self {
        self.price = Some(band);
        self
    }

    /// Restrict to products carrying a certification tag (e.g. `Organic`).
    #[must_use]
    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, Self::MAX_LIMIT);
        self
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub const fn price_band(&self) -> Option<PriceBand> {
        self.price
    }

    #[must_use]
    pub fn standard(&self) -> Option<&str> {
        self.standard.as_deref()
    }

    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Query-string pairs in the order the endpoint documents them.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(price) = self.price {
            pairs.push(("price", price.to_string()));
        }
        if let Some(standard) = &self.standard {
            pairs.push(("standard", standard.clone()));
        }
        pairs.push(("sort", self.sort.to_string()));
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

// =============================================================================
// Client-side filter
// =============================================================================

/// Filters applied after a listing has been fetched.
///
/// A product matches when its price is within the bounds (inclusive) and,
/// if any tags are given, it carries at least one of them. A bound of 0 is
/// the same as no bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub tags: Tags,
}

impl ProductFilter {
    fn min_bound(&self) -> Option<u64> {
        self.min_price.filter(|&min| min > 0)
    }

    fn max_bound(&self) -> Option<u64> {
        self.max_price.filter(|&max| max > 0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_bound().is_none() && self.max_bound().is_none() && self.tags.is_empty()
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.min_bound().is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_bound().is_some_and(|max| product.price > max) {
            return false;
        }
        self.tags.is_empty() || self.tags.iter().any(|tag| product.tags.contains(tag))
    }

    /// Keep the matching products, preserving order.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        if self.is_empty() {
            return products;
        }
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, price: u64, tags: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: "fresh".to_string(),
            price,
            original_price: None,
            unit: None,
            image: None,
            rating: 0.0,
            reviews: 0,
            is_hot: false,
            discount: None,
            tags: Tags::parse(tags),
            description: String::new(),
        }
    }

    #[test]
    fn test_product_from_api_json() {
        let json = r#"{
            "id": 1,
            "name": "Cà chua bi",
            "category": "fresh",
            "price": 45000,
            "originalPrice": 55000,
            "unit": "500g",
            "image": "/img/tomato.jpg",
            "rating": 4.5,
            "reviews": 120,
            "isHot": true,
            "discount": "-18%",
            "tags": ["Organic", "VietGAP"],
            "description": null
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.original_price, Some(55_000));
        assert!(product.is_hot);
        assert!(product.tags.contains("VietGAP"));
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_product_from_admin_json() {
        let json = r#"{
            "id": 2,
            "name": "Gạo lứt",
            "category": "dry",
            "price": 80000,
            "original_price": null,
            "is_hot": false,
            "tags": "Organic, Handmade",
            "rating": 4,
            "reviews": 3,
            "description": "Brown rice"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.original_price, None);
        assert_eq!(product.tags.as_slice(), ["Organic", "Handmade"]);
    }

    #[test]
    fn test_discount_percent() {
        let mut p = product(1, 45_000, "");
        assert_eq!(p.discount_percent(), None);

        p.original_price = Some(55_000);
        assert_eq!(p.discount_percent(), Some(18));

        p.original_price = Some(40_000);
        assert_eq!(p.discount_percent(), None);
    }

    #[test]
    fn test_catalog_response_envelope() {
        let json = r#"{"items":[{"id":1,"name":"A","price":1}],"total":9,"page":2,"limit":1,"totalPages":9}"#;
        let page = serde_json::from_str::<CatalogResponse<Product>>(json)
            .unwrap()
            .into_page();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 9);
        assert_eq!(page.page, 2);
        assert!(page.has_next());
    }

    #[test]
    fn test_catalog_response_bare_array() {
        let json = r#"[{"id":1,"title":"Mùa vải"},{"id":2,"title":"Đà Lạt"}]"#;
        let page = serde_json::from_str::<CatalogResponse<Article>>(json)
            .unwrap()
            .into_page();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_single_page_of_nothing() {
        let page = Page::<Product>::single(Vec::new());
        assert_eq!(page.total, 0);
        assert_eq!(page.limit, 1);
    }

    #[test]
    fn test_query_pairs_skip_unset_fields() {
        let query = ProductQuery::new()
            .with_category("fresh")
            .with_price_band(PriceBand::From50To200)
            .with_sort(SortOrder::PriceDesc);
        let pairs = query.to_pairs();
        let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(
            pairs,
            [
                ("category", "fresh"),
                ("price", "50-200"),
                ("sort", "price_desc"),
                ("page", "1"),
                ("limit", "8"),
            ]
        );
    }

    #[test]
    fn test_query_clamps_bounds() {
        let query = ProductQuery::new().with_page(0).with_limit(0);
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 1);
        assert_eq!(ProductQuery::new().with_limit(1000).limit(), 100);
    }

    #[test]
    fn test_parse_query_values() {
        assert_eq!("over200".parse::<PriceBand>().unwrap(), PriceBand::Over200);
        assert_eq!("PRICE_ASC".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert!(matches!(
            "cheap".parse::<PriceBand>(),
            Err(QueryError::UnknownPriceBand(_))
        ));
        assert!(matches!(
            "random".parse::<SortOrder>(),
            Err(QueryError::UnknownSortOrder(_))
        ));
    }

    #[test]
    fn test_filter_price_bounds_inclusive() {
        let filter = ProductFilter {
            min_price: Some(50_000),
            max_price: Some(200_000),
            tags: Tags::default(),
        };
        assert!(!filter.matches(&product(1, 49_999, "")));
        assert!(filter.matches(&product(2, 50_000, "")));
        assert!(filter.matches(&product(3, 200_000, "")));
        assert!(!filter.matches(&product(4, 200_001, "")));
    }

    #[test]
    fn test_filter_tags_any_of() {
        let filter = ProductFilter {
            tags: Tags::parse("Organic, Handmade"),
            ..ProductFilter::default()
        };
        let kept = filter.apply(vec![
            product(1, 1, "VietGAP"),
            product(2, 1, "Handmade"),
            product(3, 1, "Organic, VietGAP"),
        ]);
        let ids: Vec<i32> = kept.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn test_site_config_from_api_json() {
        let json = r#"{
            "hero": {"promo": "Summer Sale", "title": "Fresh Produce", "buttonText": "Shop Now"},
            "categories": ["Rau củ quả", "Gia dụng"],
            "brochures": [{"slug": "fresh", "title": "Fresh Produce", "desc": "Da Lat farms", "image": "", "buttonText": "Shop Now"}],
            "brand": {},
            "header": {"siteName": "Mountain Harvest", "tagline": "Nông sản sạch"},
            "topbar": null,
            "footer": {"phone": "1900 1234", "email": "cskh@mountainharvest.vn"}
        }"#;
        let site: SiteConfig = serde_json::from_str(json).unwrap();

        assert_eq!(site.hero.button_text.as_deref(), Some("Shop Now"));
        assert_eq!(site.hero.subtitle, None);
        assert_eq!(site.categories.len(), 2);
        assert_eq!(site.brochures.first().unwrap().slug, "fresh");
        assert_eq!(site.brand().site_name.as_deref(), Some("Mountain Harvest"));
        assert_eq!(site.brand().icon(), Brand::DEFAULT_ICON);
        assert_eq!(site.topbar, Topbar::default());
        assert_eq!(site.footer.address, None);
    }

    #[test]
    fn test_site_config_prefers_brand_over_header() {
        let site: SiteConfig = serde_json::from_str(
            r#"{"brand": {"siteName": "A", "icon": "  fas fa-leaf "}, "header": {"siteName": "B"}}"#,
        )
        .unwrap();
        assert_eq!(site.brand().site_name.as_deref(), Some("A"));
        assert_eq!(site.brand().icon(), "fas fa-leaf");

        let empty: SiteConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SiteConfig::default());
    }

    #[test]
    fn test_filter_zero_bounds_are_ignored() {
        let filter = ProductFilter {
            min_price: Some(0),
            max_price: Some(0),
            tags: Tags::default(),
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&product(1, 45_000, "")));

        let capped = ProductFilter {
            min_price: Some(0),
            max_price: Some(100_000),
            tags: Tags::default(),
        };
        assert!(capped.matches(&product(2, 0, "")));
        assert!(!capped.matches(&product(3, 100_001, "")));
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let products = vec![product(1, 10, ""), product(2, 20, "")];
        assert!(ProductFilter::default().is_empty());
        assert_eq!(ProductFilter::default().apply(products.clone()), products);
    }
}
