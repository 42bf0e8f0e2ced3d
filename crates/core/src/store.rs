//! Cart persistence contract.
//!
//! All storage access goes through [`CartStore`]. A backend only moves an
//! opaque blob in and out of one slot; encoding, decoding and the fail-soft
//! load policy live in the provided methods so every backend behaves alike.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process, for tests and previews
//! - `LocalStorageStore` (widget crate) - browser `localStorage`
//! - `FileStore` (cli crate) - a JSON file on disk

use thiserror::Error;
use tracing::{debug, warn};

use crate::cart::Cart;

/// Storage key the cart blob lives under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors from a cart storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cart could not be encoded or the blob could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend rejected the read or write (quota, privacy mode, ...).
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single-slot store holding the serialized cart.
///
/// Writes are last-writer-wins: the whole cart is re-serialized and
/// overwritten on every mutation.
pub trait CartStore {
    /// Read the raw blob, `None` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn read_blob(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the raw blob.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend rejects the write.
    fn write_blob(&mut self, blob: &str) -> Result<(), StoreError>;

    /// Delete the blob.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend rejects the delete.
    fn remove_blob(&mut self) -> Result<(), StoreError>;

    /// Load the cart.
    ///
    /// Never fails: a missing blob, an unreadable backend or an unparsable
    /// blob all yield an empty cart. Failures are logged at `warn`.
    fn load(&self) -> Cart {
        match self.read_blob() {
            Ok(Some(blob)) => decode(&blob).unwrap_or_else(|e| {
                warn!(error = %e, "Stored cart is unreadable, starting empty");
                Cart::new()
            }),
            Ok(None) => {
                debug!("No stored cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, "Cart storage unavailable, starting empty");
                Cart::new()
            }
        }
    }

    /// Serialize and overwrite the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or the backend write fails.
    fn save(&mut self, cart: &Cart) -> Result<(), StoreError> {
        let blob = encode(cart)?;
        self.write_blob(&blob)?;
        debug!(lines = cart.len(), "Cart saved");
        Ok(())
    }

    /// Forget the stored cart entirely.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend rejects the delete.
    fn clear(&mut self) -> Result<(), StoreError> {
        self.remove_blob()
    }
}

/// Encode a cart as the stored JSON array.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if encoding fails.
pub fn encode(cart: &Cart) -> Result<String, StoreError> {
    Ok(serde_json::to_string(cart)?)
}

/// Decode a stored JSON array into a cart.
///
/// A JSON `null` (what `JSON.stringify` of nothing round-trips to) decodes
/// as an empty cart.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the blob is not an array of objects.
pub fn decode(blob: &str) -> Result<Cart, StoreError> {
    let cart: Option<Cart> = serde_json::from_str(blob)?;
    Ok(cart.unwrap_or_default())
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { blob: None }
    }

    /// Create a store pre-loaded with a raw blob.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    /// The raw blob currently stored.
    #[must_use]
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl CartStore for MemoryStore {
    fn read_blob(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.clone())
    }

    fn write_blob(&mut self, blob: &str) -> Result<(), StoreError> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn remove_blob(&mut self) -> Result<(), StoreError> {
        self.blob = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{LineItem, Price, Quantity};

    /// Backend whose every operation fails.
    struct BrokenStore;

    impl CartStore for BrokenStore {
        fn read_blob(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::Backend("denied".to_string()))
        }

        fn write_blob(&mut self, _blob: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("quota exceeded".to_string()))
        }

        fn remove_blob(&mut self) -> Result<(), StoreError> {
            Err(StoreError::Backend("denied".to_string()))
        }
    }

    #[test]
    fn test_load_fresh_store_is_empty() {
        assert!(MemoryStore::new().load().is_empty());
    }

    #[test]
    fn test_load_corrupt_blob_is_empty() {
        assert!(MemoryStore::with_blob("{not json").load().is_empty());
        assert!(MemoryStore::with_blob("{\"id\":\"a\"}").load().is_empty());
        assert!(MemoryStore::with_blob("[1, 2]").load().is_empty());
    }

    #[test]
    fn test_load_null_is_empty() {
        assert!(MemoryStore::with_blob("null").load().is_empty());
    }

    #[test]
    fn test_load_backend_failure_is_empty() {
        assert!(BrokenStore.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut cart = Cart::new();
        cart.add(LineItem::new("a", "Dune", Price::from(10), Quantity::new(2)));
        store.save(&cart).unwrap();
        assert_eq!(store.load(), cart);
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = MemoryStore::with_blob("[{\"id\":\"old\"}]");
        store.save(&Cart::new()).unwrap();
        assert_eq!(store.blob(), Some("[]"));
    }

    #[test]
    fn test_save_surfaces_backend_error() {
        let err = BrokenStore.save(&Cart::new()).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::with_blob("[]");
        store.clear().unwrap();
        assert_eq!(store.blob(), None);
    }

    #[test]
    fn test_decode_reads_script_written_blob() {
        let blob = r#"[{"id":"a","title":"A","author":"","publisher":"","price":10,"image":"","quantity":2}]"#;
        let cart = decode(blob).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.grand_total(), Price::from(20));
    }

    #[test]
    fn test_load_keeps_lines_with_null_image() {
        let store =
            MemoryStore::with_blob(r#"[{"id":"a","title":"A","image":null,"price":10,"quantity":2}]"#);
        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().image_url(), None);
    }

    #[test]
    fn test_load_keeps_lines_with_null_title() {
        let store = MemoryStore::with_blob(r#"[{"id":"a","title":null,"price":10,"quantity":1}]"#);
        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().title, "Untitled");
    }

    #[test]
    fn test_load_keeps_lines_with_numeric_id() {
        let store = MemoryStore::with_blob(r#"[{"id":7,"title":"A","price":10,"quantity":1}]"#);
        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().id.as_str(), "7");
    }

    #[test]
    fn test_add_after_null_field_keeps_existing_line() {
        let mut store =
            MemoryStore::with_blob(r#"[{"id":"a","title":"A","image":null,"price":10,"quantity":2}]"#);
        let mut cart = store.load();
        cart.add(LineItem::new("b", "B", Price::from(5), Quantity::ONE));
        store.save(&cart).unwrap();

        let cart = store.load();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(0).unwrap().id.as_str(), "a");
        assert_eq!(cart.grand_total(), Price::from(25));
    }
}
