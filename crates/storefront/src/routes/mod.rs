//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog page
//! GET  /cart                   - Cart page (rendered client-side by the widget)
//! GET  /health                 - Health check
//!
//! # Assets
//! GET  /pkg/*                  - Cart widget bundle (wasm-pack output)
//! GET  /static/*               - CSS and images
//! ```

pub mod cart;
pub mod home;

use axum::{Router, http::Uri, routing::get};

use crate::error::AppError;
use crate::state::AppState;

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(home::home))
        // Cart page
        .route("/cart", get(cart::show))
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
