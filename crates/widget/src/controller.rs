//! Add-to-cart buttons.

use std::rc::Rc;

use bookstore_cart_core::{ItemAttributes, WidgetConfig, add_to_cart};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::dom::{self, Scope};
use crate::error::WidgetResult;
use crate::notify::notify;
use crate::storage::LocalStorageStore;

/// Attach a click handler to every add-to-cart control on the page.
///
/// Returns the number of controls bound. The handlers live as long as the
/// page.
///
/// # Errors
///
/// Returns `WidgetError` if there is no document or a listener cannot be
/// attached.
pub fn bind_add_triggers(config: &Rc<WidgetConfig>) -> WidgetResult<usize> {
    let doc = dom::document()?;
    let triggers = dom::all_matches(&doc, &config.selectors.add_trigger);

    for trigger in &triggers {
        let config = Rc::clone(config);
        let target = trigger.clone();
        let onclick: Closure<dyn FnMut(Event)> = Closure::new(move |_event: Event| {
            if let Err(e) = handle_add(&target, &config) {
                tracing::warn!(error = %e, "Add to cart failed");
            }
        });
        trigger.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    tracing::debug!(count = triggers.len(), "Add-to-cart controls bound");
    Ok(triggers.len())
}

/// Add the item described by `trigger` to the cart and tell the shopper.
///
/// # Errors
///
/// Returns `WidgetError` if the page or storage is unreachable. A failed
/// storage write is reported here too, after which the shopper still gets no
/// confirmation.
pub fn handle_add(trigger: &Element, config: &WidgetConfig) -> WidgetResult<()> {
    let doc = dom::document()?;
    let scope = dom::enclosing_group(trigger, &config.selectors.group_scope, &doc);
    let raw_quantity = scope
        .first_match(&config.selectors.quantity_input)
        .and_then(|control| dom::control_value(&control));

    if matches!(scope, Scope::Document(_)) {
        tracing::debug!("Add trigger has no enclosing group, using page-wide quantity");
    }

    let attributes = ItemAttributes::from_lookup(|name| trigger.get_attribute(name));
    let mut store = LocalStorageStore::open(config.storage_key.clone())?;
    let outcome = add_to_cart(&mut store, attributes, raw_quantity.as_deref())?;

    notify(&outcome.feedback_message())
}
