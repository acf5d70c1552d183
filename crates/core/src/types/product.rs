//! Catalog records and cart line items.
//!
//! These mirror the JSON shapes served by the catalog API
//! (`/products/{id}`, `/stock/{id}`) and stored in the cart snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ProductId, Quantity};

/// A product record from the catalog.
///
/// Only `id` is interpreted by the cart. The display fields are carried
/// through untouched, and any field the catalog adds beyond these lands in
/// `extra` so it survives a save/load cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub title: String,
    /// Unit price in the store currency.
    #[serde(with = "rust_decimal::serde::float", default)]
    pub price: Decimal,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Unrecognized catalog fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stock level for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Catalog identifier.
    pub id: ProductId,
    /// Units available for purchase.
    pub amount: u32,
}

impl Stock {
    /// Whether `requested` units can be satisfied from this stock.
    ///
    /// Non-positive requests are never satisfiable.
    #[must_use]
    pub fn covers(&self, requested: i64) -> bool {
        requested > 0 && requested <= i64::from(self.amount)
    }
}

/// A product held in the cart together with its quantity.
///
/// Serializes flat: `{"id": 1, "title": "...", "price": 179.9, "image": "...", "amount": 2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product record, as fetched when the item was first added.
    #[serde(flatten)]
    pub product: Product,
    /// Units of this product in the cart.
    pub amount: Quantity,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub const fn new(product: Product, amount: Quantity) -> Self {
        Self { product, amount }
    }

    /// The product identifier.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// A copy of this item with a different quantity.
    #[must_use]
    pub fn with_amount(&self, amount: Quantity) -> Self {
        Self {
            product: self.product.clone(),
            amount,
        }
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.amount.get())
    }
}
