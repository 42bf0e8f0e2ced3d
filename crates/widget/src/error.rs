//! Error handling for the cart widget.
//!
//! Nothing here ever reaches the shopper: handlers log a `WidgetError` and
//! carry on.

use bookstore_cart_core::{StoreError, TemplateError};
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Error type for widget operations.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// A browser API call threw.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// `window`, `document` or `localStorage` is not reachable.
    #[error("Missing browser global: {0}")]
    MissingGlobal(&'static str),

    /// Reading or writing the cart failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Row markup could not be rendered.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

impl From<JsValue> for WidgetError {
    fn from(js_val: JsValue) -> Self {
        let message = js_val
            .as_string()
            .or_else(|| {
                js_val
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| "Unknown JavaScript error".to_string());
        Self::JavaScript(message)
    }
}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// Result type for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
