//! Cart error taxonomy and the notices shown for each failure.
//!
//! Every failure inside a cart operation resolves to one of three kinds:
//! stock exceeded, item not found, or an unexpected collaborator failure.
//! The manager turns each into a [`Notice`] for the shopper; the error itself
//! never leaves the public operations.

use rocket_shoes_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Cart-level error type.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity is not covered by available stock.
    #[error("Requested {requested} of product {product_id}, only {available} in stock")]
    StockExceeded {
        /// Product being changed.
        product_id: ProductId,
        /// Quantity the operation would have produced.
        requested: i64,
        /// Units the catalog reported as available.
        available: u32,
    },

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// Product or stock lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Reading or writing the persisted snapshot failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The snapshot could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// The three failure categories a shopper can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    StockExceeded,
    ItemNotFound,
    Unexpected,
}

/// The public cart operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl std::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Add => "add_product",
            Self::Remove => "remove_product",
            Self::UpdateAmount => "update_product_amount",
        })
    }
}

/// Message shown to the shopper when an operation is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    StockExceeded,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notice {
    /// User-facing text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::StockExceeded => "Quantidade solicitada fora de estoque",
            Self::AddFailed => "Erro na adição do produto",
            Self::RemoveFailed => "Erro na remoção do produto",
            Self::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl CartError {
    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::StockExceeded { .. } => ErrorKind::StockExceeded,
            Self::ItemNotFound(_) => ErrorKind::ItemNotFound,
            Self::Catalog(_) | Self::Storage(_) | Self::Snapshot(_) => ErrorKind::Unexpected,
        }
    }

    /// Notice to show when this error aborts `operation`.
    ///
    /// A missing item always reports [`Notice::RemoveFailed`], including on
    /// the update path.
    #[must_use]
    pub const fn notice(&self, operation: CartOperation) -> Notice {
        match (self.kind(), operation) {
            (ErrorKind::StockExceeded, _) => Notice::StockExceeded,
            (ErrorKind::ItemNotFound, _) | (ErrorKind::Unexpected, CartOperation::Remove) => {
                Notice::RemoveFailed
            }
            (ErrorKind::Unexpected, CartOperation::Add) => Notice::AddFailed,
            (ErrorKind::Unexpected, CartOperation::UpdateAmount) => Notice::UpdateFailed,
        }
    }
}

/// Result of a public cart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The cart changed and the snapshot was written.
    Applied,
    /// The cart is unchanged; the shopper was notified.
    Rejected(ErrorKind),
}

impl Outcome {
    /// Whether the operation changed the cart.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
