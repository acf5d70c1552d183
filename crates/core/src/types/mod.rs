//! Core types for RocketShoes.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use id::*;
pub use price::{CurrencyCode, Price, UnknownCurrency};
pub use product::{LineItem, Product, Stock};
pub use quantity::{Quantity, QuantityError};
