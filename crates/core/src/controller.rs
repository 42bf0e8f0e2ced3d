//! Add-to-cart handling.
//!
//! The DOM side collects the trigger's `data-*` attributes and the raw value
//! of whatever quantity control it found; everything after that (defaults,
//! id derivation, merge, persist, feedback text) happens here.

use tracing::{info, instrument};

use crate::cart::Merge;
use crate::store::{CartStore, StoreError};
use crate::types::{ItemId, LineItem, Price, Quantity, UNTITLED};

/// Attribute names read from an add-to-cart trigger.
pub mod attr {
    pub const ID: &str = "data-id";
    pub const TITLE: &str = "data-title";
    pub const AUTHOR: &str = "data-author";
    pub const PUBLISHER: &str = "data-publisher";
    pub const PRICE: &str = "data-price";
    pub const IMAGE: &str = "data-image";
    /// Quantity carried by a non-form element.
    pub const QTY: &str = "data-qty";
}

/// Raw item metadata attached to a trigger.
///
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemAttributes {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl ItemAttributes {
    /// Collect attributes through a lookup by attribute name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Self {
            id: get(attr::ID),
            title: get(attr::TITLE),
            author: get(attr::AUTHOR),
            publisher: get(attr::PUBLISHER),
            price: get(attr::PRICE),
            image: get(attr::IMAGE),
        }
    }

    /// Build a line item, applying field defaults.
    ///
    /// The id is the explicit `data-id` if present, otherwise the slug of the
    /// raw title. With neither, the id is empty and the title `"Untitled"`.
    #[must_use]
    pub fn into_line_item(self, quantity: Quantity) -> LineItem {
        let id = self
            .id
            .map_or_else(|| ItemId::slug(self.title.as_deref().unwrap_or_default()), ItemId::new);
        let title = self.title.unwrap_or_else(|| UNTITLED.to_string());

        LineItem {
            id,
            title,
            author: self.author.unwrap_or_default(),
            publisher: self.publisher.unwrap_or_default(),
            price: self.price.as_deref().map_or(Price::ZERO, Price::parse_lenient),
            image: self.image.unwrap_or_default(),
            quantity,
        }
    }
}

/// What an add did, for feedback and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub id: ItemId,
    pub title: String,
    /// Quantity added by this click, not the line's new total.
    pub added: Quantity,
    pub merge: Merge,
    /// Lines in the cart after the add.
    pub line_count: usize,
}

impl AddOutcome {
    /// User-facing confirmation, e.g. `Dune (x2) added to cart`.
    #[must_use]
    pub fn feedback_message(&self) -> String {
        format!("{} (x{}) added to cart", self.title, self.added)
    }
}

/// Merge the trigger's item into the stored cart and persist it.
///
/// `raw_quantity` is the unparsed value of the quantity control in the
/// trigger's scope, if one was found.
///
/// # Errors
///
/// Returns `StoreError` if the cart could not be saved. The merge itself
/// cannot fail.
#[instrument(skip(store, attributes))]
pub fn add_to_cart<S: CartStore + ?Sized>(
    store: &mut S,
    attributes: ItemAttributes,
    raw_quantity: Option<&str>,
) -> Result<AddOutcome, StoreError> {
    let quantity = Quantity::parse_lenient(raw_quantity);
    let item = attributes.into_line_item(quantity);
    let id = item.id.clone();
    let title = item.title.clone();

    let mut cart = store.load();
    let merge = cart.add(item);
    store.save(&cart)?;

    info!(id = %id, quantity = %quantity, ?merge, "Added to cart");

    Ok(AddOutcome {
        id,
        title,
        added: quantity,
        merge,
        line_count: cart.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::store::MemoryStore;

    fn attrs(pairs: &[(&str, &str)]) -> ItemAttributes {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ItemAttributes::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let item = attrs(&[]).into_line_item(Quantity::ONE);
        assert_eq!(item.title, "Untitled");
        assert_eq!(item.id.as_str(), "");
        assert_eq!(item.author, "");
        assert_eq!(item.publisher, "");
        assert_eq!(item.price, Price::ZERO);
        assert_eq!(item.image_url(), None);
    }

    #[test]
    fn test_untitled_add_merges_with_empty_id_line() {
        let mut store = MemoryStore::with_blob(
            r#"[{"id":"","title":"Untitled","price":0,"quantity":1}]"#,
        );
        let outcome = add_to_cart(&mut store, attrs(&[]), None).unwrap();

        assert_eq!(outcome.merge, Merge::Incremented(0));
        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_empty_attribute_is_absent() {
        let item = attrs(&[("data-id", ""), ("data-title", "Dune")]).into_line_item(Quantity::ONE);
        assert_eq!(item.id.as_str(), "dune");
    }

    #[test]
    fn test_explicit_id_wins() {
        let item =
            attrs(&[("data-id", "isbn-1"), ("data-title", "Dune")]).into_line_item(Quantity::ONE);
        assert_eq!(item.id.as_str(), "isbn-1");
    }

    #[test]
    fn test_invalid_price_is_zero() {
        let item = attrs(&[("data-price", "free")]).into_line_item(Quantity::ONE);
        assert_eq!(item.price, Price::ZERO);
    }

    #[test]
    fn test_add_appends_with_quantity() {
        let mut store = MemoryStore::new();
        let outcome = add_to_cart(
            &mut store,
            attrs(&[("data-id", "a"), ("data-title", "A"), ("data-price", "10")]),
            Some("2"),
        )
        .unwrap();

        assert_eq!(outcome.merge, Merge::Appended(0));
        assert_eq!(outcome.line_count, 1);
        let cart = store.load();
        assert_eq!(cart.get(0).unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_add_merges_existing() {
        let mut store = MemoryStore::with_blob(
            r#"[{"id":"a","title":"A","price":10,"quantity":2},{"id":"b","title":"B","price":5,"quantity":1}]"#,
        );
        let outcome = add_to_cart(
            &mut store,
            attrs(&[("data-id", "a"), ("data-price", "10")]),
            Some("3"),
        )
        .unwrap();

        assert_eq!(outcome.merge, Merge::Incremented(0));
        let cart = store.load();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(0).unwrap().quantity.get(), 5);
        assert_eq!(cart.grand_total(), Price::from(55));
    }

    #[test]
    fn test_add_invalid_quantity_defaults_to_one() {
        let mut store = MemoryStore::new();
        for raw in [None, Some(""), Some("abc"), Some("0"), Some("-5")] {
            store.clear().unwrap();
            let outcome = add_to_cart(&mut store, attrs(&[("data-id", "a")]), raw).unwrap();
            assert_eq!(outcome.added, Quantity::ONE);
        }
    }

    #[test]
    fn test_repeated_untagged_title_merges() {
        let mut store = MemoryStore::new();
        add_to_cart(&mut store, attrs(&[("data-title", "Good Omens")]), None).unwrap();
        add_to_cart(&mut store, attrs(&[("data-title", "Good Omens")]), None).unwrap();
        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().id.as_str(), "good-omens");
        assert_eq!(cart.get(0).unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_feedback_message() {
        let mut store = MemoryStore::new();
        let outcome =
            add_to_cart(&mut store, attrs(&[("data-title", "Dune")]), Some("2")).unwrap();
        assert_eq!(outcome.feedback_message(), "Dune (x2) added to cart");
    }
}
