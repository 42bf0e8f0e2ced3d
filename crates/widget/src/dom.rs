//! DOM lookup helpers built on selector fallback chains.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::error::{WidgetError, WidgetResult};

/// The page document.
///
/// # Errors
///
/// Returns `WidgetError::MissingGlobal` outside a browser page.
pub fn document() -> WidgetResult<Document> {
    web_sys::window()
        .ok_or(WidgetError::MissingGlobal("window"))?
        .document()
        .ok_or(WidgetError::MissingGlobal("document"))
}

/// Where a quantity lookup is confined to.
pub enum Scope {
    Element(Element),
    Document(Document),
}

impl Scope {
    /// First descendant matching `selector`. Invalid selectors match nothing.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<Element> {
        let found = match self {
            Self::Element(el) => el.query_selector(selector),
            Self::Document(doc) => doc.query_selector(selector),
        };
        found.unwrap_or_else(|e| {
            tracing::debug!(selector, error = %WidgetError::from(e), "Selector rejected");
            None
        })
    }

    /// First element matched by the first selector in `selectors` that
    /// matches anything.
    #[must_use]
    pub fn first_match(&self, selectors: &[String]) -> Option<Element> {
        selectors.iter().find_map(|selector| self.query(selector))
    }
}

/// Nearest enclosing group of `trigger`, trying `group_selectors` in order,
/// falling back to the whole document.
#[must_use]
pub fn enclosing_group(trigger: &Element, group_selectors: &[String], doc: &Document) -> Scope {
    group_selectors
        .iter()
        .find_map(|selector| trigger.closest(selector).ok().flatten())
        .map_or_else(|| Scope::Document(doc.clone()), Scope::Element)
}

/// Every element matching any of `selectors`, in selector order, each once.
#[must_use]
pub fn all_matches(doc: &Document, selectors: &[String]) -> Vec<Element> {
    let mut found: Vec<Element> = Vec::new();
    for selector in selectors {
        let Ok(list) = doc.query_selector_all(selector) else {
            tracing::debug!(selector, "Selector rejected");
            continue;
        };
        for i in 0..list.length() {
            if let Some(el) = list.get(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                if !found.contains(&el) {
                    found.push(el);
                }
            }
        }
    }
    found
}

/// Current value of a quantity-bearing control.
///
/// Form controls report their `value`; any other element falls back to its
/// `data-qty` attribute.
#[must_use]
pub fn control_value(el: &Element) -> Option<String> {
    js_sys::Reflect::get(el, &"value".into())
        .ok()
        .and_then(|value| value.as_string())
        .or_else(|| el.get_attribute(bookstore_cart_core::controller::attr::QTY))
}

/// Show or hide an element via its inline `display` style.
pub fn set_visible(el: &Element, visible: bool) {
    let Some(html) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html.style();
    let result = if visible {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };
    if let Err(e) = result {
        tracing::debug!(error = %WidgetError::from(e), "Could not toggle visibility");
    }
}
