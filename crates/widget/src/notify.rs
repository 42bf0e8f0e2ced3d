//! Shopper feedback after an add.

use wasm_bindgen::{JsCast, JsValue};

use crate::error::{WidgetError, WidgetResult};

/// Global the page may define to show non-blocking notifications.
const TOAST_HOOK: &str = "toast";

/// Show `message` through `window.toast` if the page provides one, else a
/// blocking `alert`.
///
/// # Errors
///
/// Returns `WidgetError` if there is no window or the hook throws.
pub fn notify(message: &str) -> WidgetResult<()> {
    let window = web_sys::window().ok_or(WidgetError::MissingGlobal("window"))?;

    let hook = js_sys::Reflect::get(&window, &JsValue::from_str(TOAST_HOOK))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok());

    match hook {
        Some(toast) => {
            toast.call1(&window, &JsValue::from_str(message))?;
        }
        None => window.alert_with_message(message)?,
    }
    Ok(())
}
