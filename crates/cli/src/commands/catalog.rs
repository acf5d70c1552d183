//! Catalog commands.

use rocket_shoes_cart::{CartConfig, CatalogError, HttpCatalog};
use rocket_shoes_core::Price;

/// List every product in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog API request fails.
pub async fn list(config: &CartConfig) -> Result<(), CatalogError> {
    let catalog = HttpCatalog::new(&config.catalog)?;
    let products = catalog.products().await?;
    tracing::info!(count = products.len(), "Catalog loaded");

    #[allow(clippy::print_stdout)]
    {
        for product in &products {
            println!(
                "{:>4}  {:<40}  {:>12}",
                product.id,
                product.title,
                Price::new(product.price, config.currency).display()
            );
        }
    }
    Ok(())
}
