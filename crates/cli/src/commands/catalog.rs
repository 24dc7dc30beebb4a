//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # First page of fresh produce, cheapest first
//! mh-cli catalog products --category fresh --sort price_asc
//!
//! # Organic products between 20.000 ₫ and 100.000 ₫
//! mh-cli catalog products --min-price 20000 --max-price 100000 --tags Organic
//!
//! mh-cli catalog product 3
//! mh-cli catalog news --page 2
//! mh-cli catalog article 1
//! mh-cli catalog site
//! ```

use clap::Args;
use mountain_harvest_core::{
    ArticleId, Page, PriceBand, Product, ProductFilter, ProductId, ProductQuery, SortOrder, Tags,
};
use mountain_harvest_storefront::error::Result;
use mountain_harvest_storefront::state::AppState;
use tracing::info;

/// Filters for `catalog products`.
///
/// `--category`, `--price`, `--standard`, `--sort`, `--page` and `--limit`
/// are sent to the catalog; the price bounds and tags are applied to the
/// page that comes back.
#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Category slug (e.g. fresh, dry, drinks)
    #[arg(long)]
    pub category: Option<String>,

    /// Price band: under50, 50-200 or over200 (thousand đồng)
    #[arg(long)]
    pub price: Option<PriceBand>,

    /// Certification standard (e.g. VietGAP)
    #[arg(long)]
    pub standard: Option<String>,

    /// Sort order: newest, bestseller, price_asc or price_desc
    #[arg(long, default_value = "newest")]
    pub sort: SortOrder,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Products per page
    #[arg(long, default_value_t = ProductQuery::DEFAULT_LIMIT)]
    pub limit: u32,

    /// Lowest price to show, in minor units
    #[arg(long)]
    pub min_price: Option<u64>,

    /// Highest price to show, in minor units
    #[arg(long)]
    pub max_price: Option<u64>,

    /// Comma-separated tags; a product needs at least one
    #[arg(long)]
    pub tags: Option<String>,
}

impl ProductsArgs {
    fn query(&self) -> ProductQuery {
        let mut query = ProductQuery::new()
            .with_sort(self.sort)
            .with_page(self.page)
            .with_limit(self.limit);
        if let Some(category) = &self.category {
            query = query.with_category(category.as_str());
        }
        if let Some(band) = self.price {
            query = query.with_price_band(band);
        }
        if let Some(standard) = &self.standard {
            query = query.with_standard(standard.as_str());
        }
        query
    }

    fn filter(&self) -> ProductFilter {
        ProductFilter {
            min_price: self.min_price,
            max_price: self.max_price,
            tags: self.tags.as_deref().map(Tags::parse).unwrap_or_default(),
        }
    }
}

/// List one page of products.
pub async fn products(state: &AppState, args: ProductsArgs) -> Result<()> {
    let page = state.catalog().list_products(&args.query()).await?;
    let has_next = page.has_next();
    let Page {
        items,
        total,
        page: current,
        total_pages,
        ..
    } = page;
    let products = args.filter().apply(items);

    if products.is_empty() {
        info!("No products found");
    }
    for product in &products {
        info!("{}", summary_line(state, product));
    }
    info!("Page {current}/{total_pages} ({total} products in total)");
    if has_next {
        info!("More: --page {}", current + 1);
    }
    Ok(())
}

/// Show a single product.
pub async fn product(state: &AppState, id: ProductId) -> Result<()> {
    let product = state.catalog().get_product(id).await?;

    info!("{}", summary_line(state, &product));
    if !product.category.is_empty() {
        info!("Category: {}", product.category);
    }
    if !product.tags.is_empty() {
        info!("Tags: {}", product.tags);
    }
    info!("Rating: {:.1} ({} reviews)", product.rating, product.reviews);
    if !product.description.is_empty() {
        info!("{}", product.description);
    }
    Ok(())
}

/// List one page of news articles.
pub async fn news(state: &AppState, page: u32, limit: u32) -> Result<()> {
    let page = state.catalog().list_articles(page, limit).await?;

    if page.items.is_empty() {
        info!("No articles found");
    }
    for article in &page.items {
        info!(
            "#{:<4} {} ({})",
            article.id.as_i32(),
            article.title,
            article.date.as_deref().unwrap_or("undated")
        );
    }
    info!("Page {}/{}", page.page, page.total_pages);
    Ok(())
}

/// Show a single news article.
pub async fn article(state: &AppState, id: ArticleId) -> Result<()> {
    let article = state.catalog().get_article(id).await?;

    info!("{}", article.title);
    if let Some(author) = &article.author {
        info!("By {author}");
    }
    if !article.summary.is_empty() {
        info!("{}", article.summary);
    }
    if !article.content.is_empty() {
        info!("{}", article.content);
    }
    Ok(())
}

/// Show the storefront's site settings.
pub async fn site(state: &AppState) -> Result<()> {
    let site = state.catalog().get_site().await?;
    let brand = site.brand();

    info!(
        "{} [{}]",
        brand.site_name.as_deref().unwrap_or("Mountain Harvest"),
        brand.icon()
    );
    if let Some(tagline) = &brand.tagline {
        info!("{tagline}");
    }

    let hero = &site.hero;
    if let Some(title) = &hero.title {
        info!(
            "Hero: {title}{}",
            hero.promo.as_deref().map(|p| format!(" ({p})")).unwrap_or_default()
        );
    }
    if let Some(subtitle) = &hero.subtitle {
        info!("      {subtitle}");
    }

    if !site.categories.is_empty() {
        info!("Categories: {}", site.categories.join(", "));
    }
    for brochure in &site.brochures {
        info!(
            "Brochure [{}] {}: {}",
            brochure.slug,
            brochure.title,
            brochure.desc.as_deref().unwrap_or("")
        );
    }

    for (label, value) in [
        ("Shipping", &site.topbar.free_shipping),
        ("Hotline", &site.topbar.hotline),
        ("Support", &site.topbar.support),
        ("Address", &site.footer.address),
        ("Phone", &site.footer.phone),
        ("Email", &site.footer.email),
    ] {
        if let Some(value) = value {
            info!("{label}: {value}");
        }
    }
    Ok(())
}

fn summary_line(state: &AppState, product: &Product) -> String {
    let mut line = format!(
        "#{:<4} {:<32} {:>14}",
        product.id.as_i32(),
        product.name,
        state.format_price(product.price)
    );
    if let Some(unit) = &product.unit {
        line.push_str(&format!(" / {unit}"));
    }
    if let (Some(original), Some(percent)) = (product.original_price, product.discount_percent()) {
        line.push_str(&format!(
            " (was {}, -{percent}%)",
            state.format_price(original)
        ));
    }
    if product.is_hot {
        line.push_str(" [hot]");
    }
    line
}
