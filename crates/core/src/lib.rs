//! Bookstore Cart Core - cart rules, storage contract and view model.
//!
//! This crate holds everything about the bookstore cart that does not touch a
//! browser, a filesystem or a network:
//! - `widget` - wasm adapter that binds this logic to the page DOM
//! - `cli` - file-backed cart inspection and editing
//! - `storefront` - page host for the catalog and cart pages
//!
//! # Architecture
//!
//! Storage is reached only through the [`store::CartStore`] trait; backends
//! live in the crates that own the I/O. Every mutation loads the whole cart,
//! changes it, and writes the whole cart back.
//!
//! # Modules
//!
//! - [`types`] - Item ids, prices, quantities and line items
//! - [`cart`] - The ordered, id-unique cart
//! - [`store`] - Storage trait, blob codec and in-memory store
//! - [`controller`] - Add-to-cart handling
//! - [`view`] - Table view model and row mutations
//! - [`config`] - Storage key, currency and DOM selector configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod controller;
pub mod store;
pub mod types;
pub mod view;

pub use cart::{Cart, Merge};
pub use config::{ConfigError, SelectorConfig, WidgetConfig};
pub use controller::{AddOutcome, ItemAttributes, add_to_cart};
pub use store::{CART_STORAGE_KEY, CartStore, MemoryStore, StoreError};
pub use types::*;
pub use view::{CartRow, CartView, TemplateError, change_quantity, remove_line};
