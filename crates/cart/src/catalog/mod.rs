//! Product and stock lookups.
//!
//! # Architecture
//!
//! - [`Catalog`] is the seam the cart manager depends on
//! - [`HttpCatalog`] talks to the JSON REST catalog API with `reqwest`
//! - Product records are cached via `moka` (TTL from config); stock is
//!   always fetched fresh because it is validated on every mutation
//!
//! # Endpoints
//!
//! - `GET {base}/stock/{id}` - `{"id": 1, "amount": 3}`
//! - `GET {base}/products/{id}` - product record
//! - `GET {base}/products` - every product record
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::catalog::{Catalog, HttpCatalog};
//!
//! let catalog = HttpCatalog::new(&config.catalog)?;
//! let stock = catalog.stock(ProductId::new(1)).await?;
//! ```

mod cache;
mod http;

pub use http::HttpCatalog;

use std::future::Future;

use rocket_shoes_core::{Product, ProductId, Stock};
use thiserror::Error;

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request URL could not be built from the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Catalog API returned a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Leading portion of the response body.
        body: String,
    },
}

/// Source of product records and stock levels.
pub trait Catalog {
    /// Fetch the current stock level for `id`.
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CatalogError>> + Send;

    /// Fetch the full product record for `id`.
    fn product(&self, id: ProductId) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CatalogError>> + Send {
        (**self).stock(id)
    }

    fn product(&self, id: ProductId) -> impl Future<Output = Result<Product, CatalogError>> + Send {
        (**self).product(id)
    }
}
