//! RocketShoes Core - Shared domain types.
//!
//! This crate provides the types shared by every RocketShoes component:
//! - `cart` - Cart manager library (stock validation, persistence)
//! - `cli` - Command-line driver for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! storage access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, quantities and prices, plus the
//!   product, stock and line-item records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
