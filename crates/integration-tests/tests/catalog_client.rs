//! Integration tests for the HTTP catalog client.
//!
//! These run the real `HttpCatalog` against the in-process fake catalog API
//! and check status mapping, caching, and authentication.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use rocket_shoes_cart::{Catalog, CatalogError, HttpCatalog};
use rocket_shoes_core::ProductId;
use rocket_shoes_integration_tests::FakeCatalog;
use secrecy::SecretString;
use serde_json::json;

// =============================================================================
// Lookups
// =============================================================================

#[tokio::test]
async fn test_stock_lookup() {
    let server = FakeCatalog::start().await;
    server.add_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 3);
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    let stock = catalog.stock(ProductId::new(1)).await.unwrap();

    assert_eq!(stock.id, ProductId::new(1));
    assert_eq!(stock.amount, 3);
}

#[tokio::test]
async fn test_product_lookup_preserves_extra_fields() {
    let server = FakeCatalog::start().await;
    server.put_product_record(
        2,
        json!({
            "id": 2,
            "title": "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
            "price": 139.9,
            "image": "https://example.com/2.jpg",
            "sizes": [39, 40, 41]
        }),
    );
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    let product = catalog.product(ProductId::new(2)).await.unwrap();

    assert_eq!(product.price.to_string(), "139.9");
    assert_eq!(product.extra.get("sizes"), Some(&json!([39, 40, 41])));
}

#[tokio::test]
async fn test_list_products() {
    let server = FakeCatalog::start().await;
    server.add_product(1, "Tênis A", 100.0, 1);
    server.add_product(2, "Tênis B", 200.0, 1);
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    let products = catalog.products().await.unwrap();

    let ids: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![1, 2]);
}

// =============================================================================
// Status mapping
// =============================================================================

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let server = FakeCatalog::start().await;
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    let err = catalog.stock(ProductId::new(99)).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(path) if path == "stock/99"));
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let server = FakeCatalog::start().await;
    server.force_status(Some(StatusCode::TOO_MANY_REQUESTS));
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    let err = catalog.stock(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CatalogError::RateLimited(30)));
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let server = FakeCatalog::start().await;
    server.force_status(Some(StatusCode::INTERNAL_SERVER_ERROR));
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    let err = catalog.product(ProductId::new(1)).await.unwrap_err();

    match err {
        CatalogError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "forced failure");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = FakeCatalog::start().await;
    server.force_body(Some("<html>maintenance</html>"));
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    let err = catalog.stock(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CatalogError::Parse(_)));
}

// =============================================================================
// Caching
// =============================================================================

#[tokio::test]
async fn test_products_are_cached_stock_is_not() {
    let server = FakeCatalog::start().await;
    server.add_product(1, "Tênis A", 100.0, 5);
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    for _ in 0..3 {
        catalog.product(ProductId::new(1)).await.unwrap();
        catalog.stock(ProductId::new(1)).await.unwrap();
    }

    assert_eq!(server.hits("/products/1"), 1);
    assert_eq!(server.hits("/stock/1"), 3);
}

#[tokio::test]
async fn test_stock_changes_are_seen_immediately() {
    let server = FakeCatalog::start().await;
    server.add_product(1, "Tênis A", 100.0, 5);
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    assert_eq!(catalog.stock(ProductId::new(1)).await.unwrap().amount, 5);
    server.set_stock(1, 0);
    assert_eq!(catalog.stock(ProductId::new(1)).await.unwrap().amount, 0);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = FakeCatalog::start().await;
    server.add_product(1, "Tênis A", 100.0, 5);
    let mut config = server.config();
    config.api_token = Some(SecretString::from("catalog-token-7f3a"));
    let catalog = HttpCatalog::new(&config).unwrap();

    catalog.stock(ProductId::new(1)).await.unwrap();

    assert_eq!(
        server.last_authorization().as_deref(),
        Some("Bearer catalog-token-7f3a")
    );
}

#[tokio::test]
async fn test_no_token_no_authorization_header() {
    let server = FakeCatalog::start().await;
    server.add_product(1, "Tênis A", 100.0, 5);
    let catalog = HttpCatalog::new(&server.config()).unwrap();

    catalog.stock(ProductId::new(1)).await.unwrap();

    assert_eq!(server.last_authorization(), None);
}
