//! Cart commands.
//!
//! Each command opens the cart from the configured store file, applies at
//! most one operation, and prints the resulting cart. Rejections are shown
//! by the notifier and make the command exit non-zero.

use rocket_shoes_cart::{
    CartConfig, CartError, CartManager, CartSummary, CatalogError, ErrorKind, FileStore,
    HttpCatalog, Outcome, TracingNotifier, UpdateProductAmount,
};
use rocket_shoes_core::ProductId;
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The catalog client could not be created.
    #[error("Catalog client error: {0}")]
    Catalog(#[from] CatalogError),

    /// The stored cart could not be opened.
    #[error("Could not open cart: {0}")]
    Open(#[from] CartError),

    /// The operation was rejected; the reason was already displayed.
    #[error("Cart operation rejected ({0:?})")]
    Rejected(ErrorKind),
}

type Cart = CartManager<HttpCatalog, TracingNotifier, FileStore>;

fn open(config: &CartConfig) -> Result<Cart, CartCommandError> {
    let catalog = HttpCatalog::new(&config.catalog)?;
    let store = FileStore::new(&config.storage_path);
    let cart =
        CartManager::with_storage_key(catalog, TracingNotifier, store, config.storage_key.clone())?;
    Ok(cart)
}

fn finish(cart: &Cart, config: &CartConfig, outcome: Outcome) -> Result<(), CartCommandError> {
    print_summary(&cart.summary(config.currency));
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::Rejected(kind) => Err(CartCommandError::Rejected(kind)),
    }
}

/// Print the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be opened.
pub fn show(config: &CartConfig) -> Result<(), CartCommandError> {
    let cart = open(config)?;
    print_summary(&cart.summary(config.currency));
    Ok(())
}

/// Add one unit of `product_id`.
///
/// # Errors
///
/// Returns an error if the cart cannot be opened or the addition is rejected.
pub async fn add(config: &CartConfig, product_id: ProductId) -> Result<(), CartCommandError> {
    let mut cart = open(config)?;
    let outcome = cart.add_product(product_id).await;
    finish(&cart, config, outcome)
}

/// Remove `product_id`.
///
/// # Errors
///
/// Returns an error if the cart cannot be opened or the removal is rejected.
pub fn remove(config: &CartConfig, product_id: ProductId) -> Result<(), CartCommandError> {
    let mut cart = open(config)?;
    let outcome = cart.remove_product(product_id);
    finish(&cart, config, outcome)
}

/// Set `product_id` to `amount` units.
///
/// # Errors
///
/// Returns an error if the cart cannot be opened or the update is rejected.
pub async fn update(
    config: &CartConfig,
    product_id: ProductId,
    amount: i64,
) -> Result<(), CartCommandError> {
    let mut cart = open(config)?;
    let outcome = cart
        .update_product_amount(UpdateProductAmount { product_id, amount })
        .await;
    finish(&cart, config, outcome)
}

fn print_summary(summary: &CartSummary) {
    #[allow(clippy::print_stdout)]
    {
        if summary.items.is_empty() {
            println!("Cart is empty");
            return;
        }

        for item in &summary.items {
            println!(
                "{:>4}  {:<40}  {:>3} x {:>12}  = {:>12}",
                item.id, item.title, item.amount, item.price, item.subtotal
            );
        }
        println!(
            "{} product(s), {} unit(s), total {}",
            summary.distinct_items, summary.total_quantity, summary.total
        );
    }
}
