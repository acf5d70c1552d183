//! Integration test harness for the RocketShoes cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocket-shoes-integration-tests
//! ```
//!
//! No external services are needed: [`FakeCatalog`] serves the catalog API
//! (`/products`, `/products/{id}`, `/stock/{id}`) from an `axum` router bound
//! to an ephemeral localhost port.
//!
//! # Test Categories
//!
//! - `catalog_client` - HTTP catalog client behavior (status mapping, caching, auth)
//! - `cart_flow` - Cart manager end to end over HTTP and the file store

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rocket_shoes_cart::Notifier;
use rocket_shoes_cart::config::{CatalogConfig, parse_base_url};
use serde_json::{Value, json};

// =============================================================================
// Fake catalog API
// =============================================================================

#[derive(Default)]
struct CatalogData {
    products: BTreeMap<i32, Value>,
    stock: HashMap<i32, u32>,
    hits: HashMap<String, u32>,
    forced_status: Option<StatusCode>,
    raw_body: Option<String>,
    last_authorization: Option<String>,
}

type Shared = Arc<Mutex<CatalogData>>;

/// In-process catalog API server.
pub struct FakeCatalog {
    data: Shared,
    base_url: String,
}

impl FakeCatalog {
    /// Start a server on an ephemeral port.
    pub async fn start() -> Self {
        let data: Shared = Arc::default();

        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .route("/stock/{id}", get(get_stock))
            .with_state(Arc::clone(&data));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            data,
            base_url: format!("http://{addr}"),
        }
    }

    /// Catalog client configuration pointing at this server.
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig::new(parse_base_url(&self.base_url).unwrap())
    }

    /// Add a product with the given price and stock level.
    pub fn add_product(&self, id: i32, title: &str, price: f64, stock: u32) {
        let mut data = self.data.lock().unwrap();
        data.products.insert(
            id,
            json!({
                "id": id,
                "title": title,
                "price": price,
                "image": format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/{id}.jpg"),
            }),
        );
        data.stock.insert(id, stock);
    }

    /// Replace a product record verbatim.
    pub fn put_product_record(&self, id: i32, record: Value) {
        self.data.lock().unwrap().products.insert(id, record);
    }

    /// Change the stock level for a product.
    pub fn set_stock(&self, id: i32, amount: u32) {
        self.data.lock().unwrap().stock.insert(id, amount);
    }

    /// Answer every request with `status` until cleared.
    pub fn force_status(&self, status: Option<StatusCode>) {
        self.data.lock().unwrap().forced_status = status;
    }

    /// Answer every request with 200 and this body until cleared.
    pub fn force_body(&self, body: Option<&str>) {
        self.data.lock().unwrap().raw_body = body.map(str::to_owned);
    }

    /// Number of requests served for `path`, e.g. `"/products/1"`.
    #[must_use]
    pub fn hits(&self, path: &str) -> u32 {
        self.data
            .lock()
            .unwrap()
            .hits
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    /// `Authorization` header of the most recent request.
    #[must_use]
    pub fn last_authorization(&self) -> Option<String> {
        self.data.lock().unwrap().last_authorization.clone()
    }
}

/// Record the request and return an override response if one is configured.
fn intercept(data: &Shared, path: String, headers: &HeaderMap) -> Option<Response> {
    let mut data = data.lock().unwrap();
    *data.hits.entry(path).or_insert(0) += 1;
    data.last_authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    if let Some(status) = data.forced_status {
        return Some((status, [(header::RETRY_AFTER, "30")], "forced failure").into_response());
    }
    data.raw_body
        .clone()
        .map(|body| (StatusCode::OK, body).into_response())
}

async fn list_products(State(data): State<Shared>, headers: HeaderMap) -> Response {
    if let Some(response) = intercept(&data, "/products".to_string(), &headers) {
        return response;
    }
    let products: Vec<Value> = data.lock().unwrap().products.values().cloned().collect();
    Json(products).into_response()
}

async fn get_product(
    State(data): State<Shared>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    if let Some(response) = intercept(&data, format!("/products/{id}"), &headers) {
        return response;
    }
    let product = data.lock().unwrap().products.get(&id).cloned();
    product.map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |p| Json(p).into_response(),
    )
}

async fn get_stock(
    State(data): State<Shared>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    if let Some(response) = intercept(&data, format!("/stock/{id}"), &headers) {
        return response;
    }
    let amount = data.lock().unwrap().stock.get(&id).copied();
    amount.map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |amount| Json(json!({ "id": id, "amount": amount })).into_response(),
    )
}

// =============================================================================
// Notifier
// =============================================================================

/// Notifier that keeps every message for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Messages displayed so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn display(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}
