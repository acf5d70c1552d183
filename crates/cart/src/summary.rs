//! Display data derived from the cart contents.

use rocket_shoes_core::{CurrencyCode, LineItem, Price, ProductId};
use rust_decimal::Decimal;

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub amount: u32,
    pub price: String,
    pub subtotal: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub items: Vec<CartItemView>,
    /// Sum of every line subtotal, formatted.
    pub total: String,
    /// Number of distinct products (the header badge count).
    pub distinct_items: usize,
    /// Number of units across all lines.
    pub total_quantity: u64,
}

impl CartSummary {
    /// Build the summary for `items`, formatting prices in `currency`.
    #[must_use]
    pub fn from_items(items: &[LineItem], currency: CurrencyCode) -> Self {
        let total: Decimal = items.iter().map(LineItem::subtotal).sum();

        Self {
            items: items
                .iter()
                .map(|item| CartItemView::from_item(item, currency))
                .collect(),
            total: Price::new(total, currency).display(),
            distinct_items: items.len(),
            total_quantity: items.iter().map(|item| u64::from(item.amount.get())).sum(),
        }
    }
}

impl CartItemView {
    fn from_item(item: &LineItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id(),
            title: item.product.title.clone(),
            image: item.product.image.clone(),
            amount: item.amount.get(),
            price: Price::new(item.product.price, currency).display(),
            subtotal: Price::new(item.subtotal(), currency).display(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use rocket_shoes_core::{Product, Quantity};

    fn item(id: i32, price: &str, amount: i64) -> LineItem {
        LineItem::new(
            Product {
                id: ProductId::new(id),
                title: format!("Tênis {id}"),
                price: price.parse().unwrap(),
                image: String::new(),
                extra: serde_json::Map::new(),
            },
            Quantity::new(amount).unwrap(),
        )
    }

    #[test]
    fn test_empty_summary() {
        let summary = CartSummary::from_items(&[], CurrencyCode::BRL);
        assert!(summary.items.is_empty());
        assert_eq!(summary.total, "R$ 0,00");
        assert_eq!(summary.distinct_items, 0);
        assert_eq!(summary.total_quantity, 0);
    }

    #[test]
    fn test_summary_totals() {
        let items = [item(1, "179.9", 2), item(2, "139.9", 1)];
        let summary = CartSummary::from_items(&items, CurrencyCode::BRL);

        assert_eq!(summary.distinct_items, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.total, "R$ 499,70");

        let first = &summary.items[0];
        assert_eq!(first.price, "R$ 179,90");
        assert_eq!(first.subtotal, "R$ 359,80");
        assert_eq!(first.amount, 2);
    }
}
