//! RocketShoes Cart - Shopping cart state management.
//!
//! Holds the shopper's line items, validates every change against live
//! stock, and writes the cart back to a key-value store after each change
//! so it survives restarts.
//!
//! # Architecture
//!
//! - [`CartManager`] owns the cart and exposes the three mutating operations
//!   (`add_product`, `remove_product`, `update_product_amount`)
//! - Collaborators are injected through traits: [`Catalog`] for product and
//!   stock lookups, [`Notifier`] for user-facing messages, and
//!   [`KeyValueStore`] for persistence
//! - Failures never escape an operation: they are reported through the
//!   notifier and summarized in the returned [`Outcome`]
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::{CartConfig, CartManager, FileStore, HttpCatalog, TracingNotifier};
//!
//! let config = CartConfig::from_env()?;
//! let catalog = HttpCatalog::new(&config.catalog)?;
//! let store = FileStore::new(&config.storage_path);
//! let mut cart = CartManager::with_storage_key(catalog, TracingNotifier, store, config.storage_key)?;
//!
//! cart.add_product(ProductId::new(1)).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod manager;
pub mod notify;
pub mod storage;
pub mod summary;

pub use catalog::{Catalog, CatalogError, HttpCatalog};
pub use config::{CartConfig, CatalogConfig, ConfigError};
pub use error::{CartError, CartOperation, ErrorKind, Notice, Outcome};
pub use manager::{CartManager, UpdateProductAmount};
pub use notify::{NOTICE_TARGET, Notifier, TracingNotifier};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use summary::{CartItemView, CartSummary};
