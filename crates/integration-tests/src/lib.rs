//! Integration tests for the bookstore cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookstore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart operations against the file and memory stores
//! - `storefront_routes` - Page host routes driven through the router
//!
//! Browser behaviour of the widget is covered by `wasm-bindgen-test` in the
//! widget crate.

use std::path::Path;

use bookstore_storefront::catalog::Catalog;
use bookstore_storefront::config::StorefrontConfig;
use bookstore_storefront::state::AppState;

/// Two-line cart: `a` at 10 x2 and `b` at 5 x1, totalling 25.
pub const SAMPLE_CART: &str = r#"[{"id":"a","title":"A","price":10,"quantity":2},{"id":"b","title":"B","price":5,"quantity":1}]"#;

/// Catalog used by the route tests.
pub const SAMPLE_CATALOG: &str = r"
books:
  - id: the-hobbit
    title: The Hobbit
    author: J. R. R. Tolkien
    price: 399
  - title: Malgudi Days
    author: R. K. Narayan
    price: 199
";

/// Build storefront state serving assets from `asset_dir`.
///
/// # Panics
///
/// Panics if [`SAMPLE_CATALOG`] does not parse.
#[must_use]
pub fn test_state(asset_dir: &Path) -> AppState {
    let config = StorefrontConfig {
        pkg_dir: asset_dir.join("pkg"),
        static_dir: asset_dir.join("static"),
        ..StorefrontConfig::default()
    };
    let catalog = Catalog::from_yaml(SAMPLE_CATALOG).expect("sample catalog should parse");
    AppState::new(config, catalog)
}
