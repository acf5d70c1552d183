//! The cart state container.
//!
//! [`CartManager`] owns the ordered line items, loads them from the
//! key-value store on construction, and writes the full snapshot back after
//! every successful mutation. Each mutation builds the next collection,
//! persists it, and only then replaces the in-memory state, so a rejected or
//! failed operation leaves both untouched.

use rocket_shoes_core::{CurrencyCode, LineItem, ProductId, Quantity, Stock};
use tracing::{info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::{CartError, CartOperation, ErrorKind, Outcome, Result};
use crate::notify::Notifier;
use crate::storage::{KeyValueStore, keys};
use crate::summary::CartSummary;

/// Request to set a line item's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Desired quantity; values outside `1..=stock` are rejected.
    pub amount: i64,
}

/// Shopping cart backed by a catalog, a notifier and a key-value store.
pub struct CartManager<C, N, S> {
    catalog: C,
    notifier: N,
    store: S,
    storage_key: String,
    items: Vec<LineItem>,
}

impl<C, N, S> std::fmt::Debug for CartManager<C, N, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("storage_key", &self.storage_key)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl<C, N, S> CartManager<C, N, S>
where
    C: Catalog,
    N: Notifier,
    S: KeyValueStore,
{
    /// Create a manager using the default storage key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds a snapshot that
    /// does not decode.
    pub fn new(catalog: C, notifier: N, store: S) -> Result<Self> {
        Self::with_storage_key(catalog, notifier, store, keys::CART)
    }

    /// Create a manager persisting under `storage_key`.
    ///
    /// An absent snapshot starts an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds a snapshot that
    /// does not decode.
    pub fn with_storage_key(
        catalog: C,
        notifier: N,
        store: S,
        storage_key: impl Into<String>,
    ) -> Result<Self> {
        let storage_key = storage_key.into();
        let items = match store.get(&storage_key)? {
            Some(raw) => serde_json::from_str::<Vec<LineItem>>(&raw)?,
            None => Vec::new(),
        };
        tracing::debug!(key = %storage_key, items = items.len(), "Cart loaded");

        Ok(Self {
            catalog,
            notifier,
            store,
            storage_key,
            items,
        })
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[LineItem] {
        &self.items
    }

    /// The line item for `product_id`, if present.
    #[must_use]
    pub fn line_item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    /// Display summary of the cart.
    #[must_use]
    pub fn summary(&self, currency: CurrencyCode) -> CartSummary {
        CartSummary::from_items(&self.items, currency)
    }

    /// Add one unit of `product_id`, inserting it if absent.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Outcome {
        let result = self.try_add_product(product_id).await;
        self.settle(CartOperation::Add, result)
    }

    /// Remove `product_id` from the cart.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Outcome {
        let result = self.try_remove_product(product_id);
        self.settle(CartOperation::Remove, result)
    }

    /// Set the quantity of a product already in the cart.
    #[instrument(skip(self, request), fields(product_id = %request.product_id, amount = request.amount))]
    pub async fn update_product_amount(&mut self, request: UpdateProductAmount) -> Outcome {
        let result = self.try_update_product_amount(request).await;
        self.settle(CartOperation::UpdateAmount, result)
    }

    // =========================================================================
    // Operation bodies
    // =========================================================================

    async fn try_add_product(&mut self, product_id: ProductId) -> Result<()> {
        let stock = self.catalog.stock(product_id).await?;

        let next = if let Some(existing) = self.line_item(product_id) {
            let current = existing.amount;
            let amount = current
                .incremented()
                .filter(|amount| stock.covers(i64::from(amount.get())))
                .ok_or(CartError::StockExceeded {
                    product_id,
                    requested: i64::from(current.get()) + 1,
                    available: stock.amount,
                })?;
            self.with_amount(product_id, amount)
        } else {
            let product = self.catalog.product(product_id).await?;
            let mut next = self.items.clone();
            next.push(LineItem::new(product, Quantity::ONE));
            next
        };

        self.commit(next)
    }

    fn try_remove_product(&mut self, product_id: ProductId) -> Result<()> {
        if self.line_item(product_id).is_none() {
            return Err(CartError::ItemNotFound(product_id));
        }

        let next = self
            .items
            .iter()
            .filter(|item| item.id() != product_id)
            .cloned()
            .collect();

        self.commit(next)
    }

    async fn try_update_product_amount(&mut self, request: UpdateProductAmount) -> Result<()> {
        let UpdateProductAmount { product_id, amount } = request;
        let stock = self.catalog.stock(product_id).await?;

        if self.line_item(product_id).is_none() {
            return Err(CartError::ItemNotFound(product_id));
        }

        let amount = checked_amount(&stock, product_id, amount)?;
        let next = self.with_amount(product_id, amount);

        self.commit(next)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Copy of the items with `product_id` set to `amount`.
    fn with_amount(&self, product_id: ProductId, amount: Quantity) -> Vec<LineItem> {
        self.items
            .iter()
            .map(|item| {
                if item.id() == product_id {
                    item.with_amount(amount)
                } else {
                    item.clone()
                }
            })
            .collect()
    }

    /// Persist `next`, then make it the current state.
    fn commit(&mut self, next: Vec<LineItem>) -> Result<()> {
        let snapshot = serde_json::to_string(&next)?;
        self.store.set(&self.storage_key, &snapshot)?;
        self.items = next;
        Ok(())
    }

    /// Report the result of an operation to the shopper.
    fn settle(&self, operation: CartOperation, result: Result<()>) -> Outcome {
        match result {
            Ok(()) => {
                info!(%operation, items = self.items.len(), "Cart updated");
                Outcome::Applied
            }
            Err(err) => {
                let kind = err.kind();
                if kind == ErrorKind::Unexpected {
                    tracing::error!(%operation, error = %err, "Cart operation failed");
                } else {
                    warn!(%operation, error = %err, "Cart operation rejected");
                }
                self.notifier.display(err.notice(operation).message());
                Outcome::Rejected(kind)
            }
        }
    }
}

/// Validate `requested` against `stock`.
fn checked_amount(stock: &Stock, product_id: ProductId, requested: i64) -> Result<Quantity> {
    let exceeded = || CartError::StockExceeded {
        product_id,
        requested,
        available: stock.amount,
    };
    if !stock.covers(requested) {
        return Err(exceeded());
    }
    Quantity::new(requested).map_err(|_| exceeded())
}
