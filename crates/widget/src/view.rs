//! Cart table rendering and row controls.
//!
//! Every render replaces the rows wholesale and binds fresh handlers tagged
//! with the new row positions. Handlers from a previous pass are never reused
//! because their positions may be stale.

use std::cell::RefCell;
use std::rc::Rc;

use bookstore_cart_core::view::{change_quantity, parse_row_index, remove_line};
use bookstore_cart_core::{CartStore, CartView, StoreError, WidgetConfig};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::dom::{self, Scope};
use crate::error::{WidgetError, WidgetResult};
use crate::storage::LocalStorageStore;

type RowHandler = Closure<dyn FnMut(Event)>;

/// Mutation applied by a row control: store, row index, the control itself.
type RowAction = fn(&mut LocalStorageStore, usize, &Element) -> Result<(), StoreError>;

thread_local! {
    /// Handlers bound by the latest render pass.
    static ROW_HANDLERS: RefCell<Vec<RowHandler>> = const { RefCell::new(Vec::new()) };
    /// Handlers of the pass before. One of them may be running the render
    /// that retired it, so it must outlive that render.
    static RETIRED_HANDLERS: RefCell<Vec<RowHandler>> = const { RefCell::new(Vec::new()) };
}

/// Render the cart into the page.
///
/// Returns `false` without touching anything when the page has no items
/// container.
///
/// # Errors
///
/// Returns `WidgetError` if the page or storage is unreachable, the rows
/// cannot be rendered, or a listener cannot be attached.
pub fn render(config: &Rc<WidgetConfig>) -> WidgetResult<bool> {
    let selectors = &config.selectors;
    let page = Scope::Document(dom::document()?);

    let Some(items) = page.first_match(&selectors.items_container) else {
        return Ok(false);
    };
    let total = page.first_match(&selectors.total_display);
    let empty = page.first_match(&selectors.empty_indicator);

    let store = LocalStorageStore::open(config.storage_key.clone())?;
    let view = CartView::build(&store.load(), &config.price_format());

    if view.is_empty() {
        items.set_inner_html("");
        if let Some(el) = &empty {
            dom::set_visible(el, true);
        }
        if let Some(el) = &total {
            el.set_text_content(Some(""));
        }
        install_handlers(Vec::new());
        return Ok(true);
    }

    if let Some(el) = &empty {
        dom::set_visible(el, false);
    }
    items.set_inner_html(&view.rows_html(selectors)?);
    if let Some(el) = &total {
        el.set_text_content(Some(&view.total_label));
    }

    let mut handlers = Vec::with_capacity(view.rows.len() * 2);
    bind_row_controls(
        &items,
        &selectors.row_quantity,
        "change",
        config,
        apply_quantity,
        &mut handlers,
    )?;
    bind_row_controls(
        &items,
        &selectors.row_remove,
        "click",
        config,
        apply_remove,
        &mut handlers,
    )?;
    install_handlers(handlers);

    tracing::debug!(rows = view.rows.len(), total = %view.total_label, "Cart rendered");
    Ok(true)
}

/// Render, logging instead of returning failures.
pub fn render_or_log(config: &Rc<WidgetConfig>) {
    if let Err(e) = render(config) {
        tracing::warn!(error = %e, "Cart render failed");
    }
}

fn apply_quantity(
    store: &mut LocalStorageStore,
    index: usize,
    control: &Element,
) -> Result<(), StoreError> {
    let raw = dom::control_value(control);
    change_quantity(store, index, raw.as_deref()).map(|_| ())
}

fn apply_remove(
    store: &mut LocalStorageStore,
    index: usize,
    _control: &Element,
) -> Result<(), StoreError> {
    remove_line(store, index).map(|_| ())
}

/// Bind `action` to `event` on every row control matching `selector`.
fn bind_row_controls(
    items: &Element,
    selector: &str,
    event: &str,
    config: &Rc<WidgetConfig>,
    action: RowAction,
    handlers: &mut Vec<RowHandler>,
) -> WidgetResult<()> {
    let controls = items.query_selector_all(selector)?;

    for i in 0..controls.length() {
        let Some(control) = controls.get(i).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let Some(index) = parse_row_index(control.get_attribute("data-index").as_deref()) else {
            continue;
        };

        let config = Rc::clone(config);
        let target = control.clone();
        let handler: RowHandler = Closure::new(move |_event: Event| {
            let result = LocalStorageStore::open(config.storage_key.clone()).and_then(|mut store| {
                action(&mut store, index, &target).map_err(WidgetError::from)
            });
            if let Err(e) = result {
                tracing::warn!(error = %e, index, "Cart row update failed");
            }
            render_or_log(&config);
        });

        control.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
        handlers.push(handler);
    }
    Ok(())
}

/// Make `handlers` current, retire the previous pass and drop the one before.
fn install_handlers(handlers: Vec<RowHandler>) {
    let previous = ROW_HANDLERS.with(|cell| cell.replace(handlers));
    let stale = RETIRED_HANDLERS.with(|cell| cell.replace(previous));
    drop(stale);
}
