//! Bookstore Cart Widget - browser bindings for the cart.
//!
//! Loaded as a wasm module by the catalog and cart pages. On startup it binds
//! every add-to-cart control and renders the cart table if the page has one.
//! Pages without a cart table simply get the add handlers.
//!
//! # Page contract
//!
//! - Add controls: `.add-to-cart-btn` or `[data-add-to-cart]`, item metadata
//!   in `data-id`, `data-title`, `data-author`, `data-publisher`,
//!   `data-price`, `data-image`
//! - Cart table: `#cart-items` (rows), `#cart-total`, `#cart-empty-message`
//! - `window.toast(message)` - optional notifier, `alert` otherwise
//! - `window.cartConfig` - optional override of [`WidgetConfig`]
//! - `window.renderCart()` - installed by the widget for inline markup

// wasm-bindgen expands exported items into FFI glue
#![allow(unsafe_code)]

pub mod controller;
pub mod dom;
pub mod error;
pub mod notify;
pub mod storage;
pub mod view;

use std::cell::RefCell;
use std::rc::Rc;

use bookstore_cart_core::{CartStore, WidgetConfig};
use wasm_bindgen::prelude::*;

use crate::error::{WidgetError, WidgetResult};
use crate::storage::LocalStorageStore;

/// Global a page may set to override the default configuration.
const CONFIG_GLOBAL: &str = "cartConfig";

/// Global the render entry point is installed under.
const RENDER_GLOBAL: &str = "renderCart";

thread_local! {
    static CONFIG: RefCell<Option<Rc<WidgetConfig>>> = const { RefCell::new(None) };
}

/// Configuration resolved once per page.
fn config() -> Rc<WidgetConfig> {
    CONFIG.with(|cell| {
        Rc::clone(
            cell.borrow_mut()
                .get_or_insert_with(|| Rc::new(page_config())),
        )
    })
}

/// Read `window.cartConfig`, falling back to defaults when it is absent or
/// invalid.
#[must_use]
pub fn page_config() -> WidgetConfig {
    match read_page_config() {
        Ok(Some(config)) => {
            tracing::debug!("Using page cart configuration");
            config
        }
        Ok(None) => WidgetConfig::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring page cart configuration");
            WidgetConfig::default()
        }
    }
}

fn read_page_config() -> WidgetResult<Option<WidgetConfig>> {
    let window = web_sys::window().ok_or(WidgetError::MissingGlobal("window"))?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let json = String::from(js_sys::JSON::stringify(&value)?);
    WidgetConfig::from_json(&json)
        .map(Some)
        .map_err(|e| WidgetError::JavaScript(e.to_string()))
}

/// Module entry point, run by the wasm-bindgen loader.
///
/// # Errors
///
/// Returns an error if there is no document or a listener cannot be attached.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build(),
    );

    install_render_global()?;

    // The module usually loads after parsing is done, in which case
    // DOMContentLoaded has already fired.
    let doc = dom::document()?;
    if doc.ready_state() == "loading" {
        let onready: Closure<dyn FnMut()> = Closure::once(on_ready);
        doc.add_event_listener_with_callback("DOMContentLoaded", onready.as_ref().unchecked_ref())?;
        onready.forget();
    } else {
        on_ready();
    }
    Ok(())
}

fn on_ready() {
    let config = config();
    match controller::bind_add_triggers(&config) {
        Ok(count) => tracing::info!(count, "Cart widget ready"),
        Err(e) => tracing::warn!(error = %e, "Could not bind add-to-cart controls"),
    }
    view::render_or_log(&config);
}

/// Expose [`render_cart`] as `window.renderCart`.
fn install_render_global() -> WidgetResult<()> {
    let window = web_sys::window().ok_or(WidgetError::MissingGlobal("window"))?;
    let render: Closure<dyn Fn()> = Closure::new(render_cart);
    js_sys::Reflect::set(&window, &JsValue::from_str(RENDER_GLOBAL), render.as_ref())?;
    render.forget();
    Ok(())
}

/// Re-render the cart table. A no-op on pages without one.
#[wasm_bindgen(js_name = renderCart)]
pub fn render_cart() {
    view::render_or_log(&config());
}

/// Total units in the cart, for header badges.
#[wasm_bindgen(js_name = cartItemCount)]
#[must_use]
pub fn cart_item_count() -> u32 {
    LocalStorageStore::open(config().storage_key.clone())
        .map(|store| u32::try_from(store.load().item_count()).unwrap_or(u32::MAX))
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Cart storage unavailable");
            0
        })
}
