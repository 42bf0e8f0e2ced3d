//! Bookstore Storefront library.
//!
//! Serves the catalog and cart pages plus the cart widget bundle. The server
//! never sees a cart; shoppers' carts live in their browsers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod routes;
pub mod state;

use axum::http::{HeaderValue, header};
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router.
///
/// Sentry layers are added by the binary so tests can drive the router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    let config = state.config();

    // The widget bundle is rebuilt in place, so browsers must revalidate it
    let pkg = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .service(ServeDir::new(&config.pkg_dir));

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/pkg", pkg)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
