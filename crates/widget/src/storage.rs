//! `localStorage` cart backend.

use bookstore_cart_core::{CartStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::{WidgetError, WidgetResult};

/// Cart store backed by the page origin's `localStorage`.
pub struct LocalStorageStore {
    storage: Storage,
    key: String,
}

impl LocalStorageStore {
    /// Open the window's `localStorage` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::MissingGlobal` if there is no window or storage
    /// is disabled (some privacy modes throw on access).
    pub fn open(key: impl Into<String>) -> WidgetResult<Self> {
        let storage = web_sys::window()
            .ok_or(WidgetError::MissingGlobal("window"))?
            .local_storage()?
            .ok_or(WidgetError::MissingGlobal("localStorage"))?;
        Ok(Self {
            storage,
            key: key.into(),
        })
    }
}

fn backend_error(err: &JsValue) -> StoreError {
    StoreError::Backend(WidgetError::from(err.clone()).to_string())
}

impl CartStore for LocalStorageStore {
    fn read_blob(&self) -> Result<Option<String>, StoreError> {
        self.storage.get_item(&self.key).map_err(|e| backend_error(&e))
    }

    fn write_blob(&mut self, blob: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(&self.key, blob)
            .map_err(|e| backend_error(&e))
    }

    fn remove_blob(&mut self) -> Result<(), StoreError> {
        self.storage
            .remove_item(&self.key)
            .map_err(|e| backend_error(&e))
    }
}
