//! Integration tests for the catalog client.
//!
//! A `wiremock` server stands in for the catalog API.

#![allow(clippy::unwrap_used)]

use mountain_harvest_core::{ArticleId, PriceBand, ProductId, ProductQuery, SortOrder};
use mountain_harvest_integration_tests::{TempCartDir, test_state};
use mountain_harvest_storefront::cart::{CartStore, MemoryStorage};
use mountain_harvest_storefront::catalog::CatalogError;
use mountain_harvest_storefront::error::AppError;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tomato_json() -> Value {
    json!({
        "id": 1,
        "name": "Cà chua bi Đà Lạt",
        "category": "fresh",
        "price": 45000,
        "originalPrice": 55000,
        "image": "/images/tomato.jpg",
        "rating": 4.8,
        "reviews": 124,
        "isHot": true,
        "discount": "-18%",
        "tags": "Organic, VietGAP",
        "description": "Trồng trong nhà kính",
        "unit": "500g"
    })
}

fn rice_json() -> Value {
    json!({
        "id": 2,
        "name": "Gạo ST25",
        "category": "dry",
        "price": 120000,
        "tags": ["OCOP"],
        "unit": "5kg"
    })
}

// ============================================================================
// Product listings
// ============================================================================

#[tokio::test]
async fn test_list_products_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([tomato_json(), rice_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());
    let page = state
        .catalog()
        .list_products(&ProductQuery::new())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 2);
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_next());

    let tomato = page.items.first().unwrap();
    assert_eq!(tomato.original_price, Some(55_000));
    assert!(tomato.is_hot);
    assert_eq!(tomato.tags.as_slice(), ["Organic", "VietGAP"]);
}

#[tokio::test]
async fn test_list_products_sends_query_and_reads_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "fresh"))
        .and(query_param("price", "50-200"))
        .and(query_param("sort", "price_asc"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [rice_json()],
            "total": 3,
            "page": 2,
            "limit": 1,
            "totalPages": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());
    let query = ProductQuery::new()
        .with_category("fresh")
        .with_price_band(PriceBand::From50To200)
        .with_sort(SortOrder::PriceAsc)
        .with_page(2)
        .with_limit(1);

    let page = state.catalog().list_products(&query).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total, 3);
    assert!(page.has_next());
    assert_eq!(page.items.first().unwrap().id, ProductId::new(2));
}

#[tokio::test]
async fn test_list_products_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());
    let err = state
        .catalog()
        .list_products(&ProductQuery::new())
        .await
        .unwrap_err();

    match err {
        CatalogError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "database is down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_products_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());
    let err = state
        .catalog()
        .list_products(&ProductQuery::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Parse(_)));
}

// ============================================================================
// Single products
// ============================================================================

#[tokio::test]
async fn test_get_product_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tomato_json()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());

    let first = state.catalog().get_product(ProductId::new(1)).await.unwrap();
    let second = state.catalog().get_product(ProductId::new(1)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.discount_percent(), Some(18));
}

#[tokio::test]
async fn test_get_product_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found"})))
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());
    let err = state
        .catalog()
        .get_product(ProductId::new(99))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(ref p) if p == "/api/products/99"));
}

// ============================================================================
// News
// ============================================================================

#[tokio::test]
async fn test_list_and_get_articles() {
    let server = MockServer::start().await;
    let article = json!({
        "id": 7,
        "title": "Mùa dâu Đà Lạt",
        "summary": "Dâu tây vào mùa",
        "content": "...",
        "author": "Ban biên tập",
        "date": "2024-12-01"
    });
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([article.clone()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/news/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(article))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());

    let page = state.catalog().list_articles(1, 5).await.unwrap();
    assert_eq!(page.items.len(), 1);

    let article = state.catalog().get_article(ArticleId::new(7)).await.unwrap();
    assert_eq!(article.title, "Mùa dâu Đà Lạt");
    assert_eq!(article.date.as_deref(), Some("2024-12-01"));
    state.catalog().get_article(ArticleId::new(7)).await.unwrap();
}

// ============================================================================
// Site settings
// ============================================================================

#[tokio::test]
async fn test_get_site_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hero": {
                "promo": "Summer Sale",
                "title": "Fresh Produce For Green Living",
                "subtitle": "Up to 20% off.",
                "image": "",
                "buttonText": "Shop Now"
            },
            "categories": ["Rau củ quả", "Hạt & Ngũ cốc", "Gia dụng"],
            "brochures": [
                {"slug": "fresh", "title": "Fresh Produce", "desc": "Harvested from Da Lat farms.", "image": "", "buttonText": "Shop Now"}
            ],
            "brand": {},
            "header": {"siteName": "Mountain Harvest", "tagline": "Nông sản sạch"},
            "topbar": {"freeShipping": "Free shipping for orders over 500k", "hotline": "1900 1234"},
            "footer": {"address": "123 Đường Mây Núi, Đà Lạt", "email": "cskh@mountainharvest.vn"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());

    let site = state.catalog().get_site().await.unwrap();
    assert_eq!(site.hero.button_text.as_deref(), Some("Shop Now"));
    assert_eq!(site.categories.len(), 3);
    assert_eq!(site.brochures.first().unwrap().slug, "fresh");
    assert_eq!(site.brand().site_name.as_deref(), Some("Mountain Harvest"));
    assert_eq!(site.topbar.hotline.as_deref(), Some("1900 1234"));
    assert_eq!(site.footer.phone, None);

    let again = state.catalog().get_site().await.unwrap();
    assert_eq!(again, site);
}

#[tokio::test]
async fn test_get_site_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("maintenance")))
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());
    let err = state.catalog().get_site().await.unwrap_err();

    assert!(matches!(err, CatalogError::Parse(_)));
}

// ============================================================================
// Adding catalog products to the cart
// ============================================================================

#[tokio::test]
async fn test_add_to_cart_snapshots_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tomato_json()))
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());
    let mut cart = CartStore::open(MemoryStorage::default());

    state
        .add_to_cart(&mut cart, ProductId::new(1), 2)
        .await
        .unwrap();
    state
        .add_to_cart(&mut cart, ProductId::new(1), 1)
        .await
        .unwrap();

    let line = cart.get(ProductId::new(1)).unwrap();
    assert_eq!(line.quantity, 3);
    assert_eq!(line.item.unit_price, 45_000);
    assert_eq!(line.item.unit.as_deref(), Some("500g"));
    assert_eq!(state.format_price(cart.total()), "135.000\u{a0}₫");
}

#[tokio::test]
async fn test_add_unknown_product_leaves_cart_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempCartDir::new();
    let state = test_state(&server.uri(), dir.path());
    let mut cart = state.open_cart();

    let err = state
        .add_to_cart(&mut cart, ProductId::new(42), 1)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 66);
    assert!(matches!(err, AppError::Catalog(CatalogError::NotFound(_))));
    assert!(cart.is_empty());
    assert!(!cart.storage().path_for("cart").exists());
}
