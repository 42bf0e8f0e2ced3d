//! Cart page route handler.
//!
//! The page is a shell: rows, totals and the empty state are filled in by the
//! cart widget from browser storage.

use askama::Template;
use axum::{extract::State, response::Html};
use bookstore_cart_core::WidgetConfig;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Cart page template.
#[derive(Template)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    /// Published to the widget as `window.cartConfig`.
    pub cart_config: WidgetConfig,
}

/// Display the cart page.
///
/// # Errors
///
/// Returns `AppError::Template` if the page fails to render.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Html<String>> {
    let template = CartTemplate {
        cart_config: state.widget_config().clone(),
    };
    Ok(Html(template.render()?))
}
