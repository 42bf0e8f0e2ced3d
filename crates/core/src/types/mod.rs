//! Core types for the bookstore cart.
//!
//! This module provides type-safe wrappers for the cart's domain values.

pub mod id;
pub mod item;
pub mod price;
pub mod quantity;

pub use id::ItemId;
pub use item::{LineItem, UNTITLED};
pub use price::{DEFAULT_CURRENCY_SYMBOL, Price, PriceFormat};
pub use quantity::Quantity;
