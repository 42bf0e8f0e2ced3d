//! Bookstore Cart CLI - file-backed cart store and the commands built on it.
//!
//! The binary is a thin `clap` front end over [`commands::cart`]; the
//! library half exists so the store and commands can be driven from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod store;

pub use store::{DEFAULT_CART_FILE, FileStore};
