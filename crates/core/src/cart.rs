//! The cart: an ordered list of line items, unique by id.
//!
//! Insertion order is display order. Rows in a rendered cart are addressed by
//! their position, so an index is only meaningful against the cart it was
//! taken from; any removal shifts the indices of every later line.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{ItemId, LineItem, Price, Quantity};

/// Result of merging a line into the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// A new line was appended at this index.
    Appended(usize),
    /// An existing line at this index had its quantity increased.
    Incremented(usize),
}

impl Merge {
    /// Index of the affected line.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Appended(index) | Self::Incremented(index) => index,
        }
    }
}

/// Ordered sequence of line items with no two lines sharing an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from stored lines.
    ///
    /// Lines sharing an id are folded into the first occurrence so the
    /// uniqueness invariant holds even for hand-edited blobs.
    #[must_use]
    pub fn from_lines(lines: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line);
        }
        cart
    }

    /// Merge a line into the cart.
    ///
    /// If a line with the same id exists its quantity grows by the incoming
    /// quantity and all other fields are left alone; otherwise the line is
    /// appended.
    pub fn add(&mut self, item: LineItem) -> Merge {
        if let Some(index) = self.position(&item.id) {
            if let Some(existing) = self.lines.get_mut(index) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            Merge::Incremented(index)
        } else {
            self.lines.push(item);
            Merge::Appended(self.lines.len() - 1)
        }
    }

    /// Overwrite the quantity of the line at `index`.
    ///
    /// Returns `false` if there is no such line.
    pub fn set_quantity(&mut self, index: usize, quantity: Quantity) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove and return the line at `index`, preserving the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<LineItem> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Position of the line with the given id.
    #[must_use]
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }

    /// Line at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.lines.get(index)
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity.get())).sum()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.lines.iter().map(LineItem::subtotal).sum()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<LineItem>::deserialize(deserializer).map(Self::from_lines)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = core::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, price: u32, quantity: u32) -> LineItem {
        LineItem::new(id, id.to_uppercase(), Price::from(price), Quantity::new(quantity))
    }

    fn sample() -> Cart {
        Cart::from_lines(vec![line("a", 10, 2), line("b", 5, 1)])
    }

    #[test]
    fn test_add_new_id_appends_one_line() {
        let mut cart = sample();
        let merge = cart.add(line("c", 7, 4));
        assert_eq!(merge, Merge::Appended(2));
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.get(2).unwrap().quantity.get(), 4);
    }

    #[test]
    fn test_add_existing_id_increments() {
        let mut cart = sample();
        let merge = cart.add(line("a", 10, 3));
        assert_eq!(merge, Merge::Incremented(0));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(0).unwrap().quantity.get(), 5);
        assert_eq!(cart.grand_total(), Price::from(55));
    }

    #[test]
    fn test_add_existing_keeps_original_fields() {
        let mut cart = sample();
        let mut incoming = line("a", 99, 1);
        incoming.title = "Other".to_string();
        cart.add(incoming);
        let first = cart.get(0).unwrap();
        assert_eq!(first.title, "A");
        assert_eq!(first.price, Price::from(10));
    }

    #[test]
    fn test_from_lines_folds_duplicates() {
        let cart = Cart::from_lines(vec![line("a", 10, 1), line("b", 5, 1), line("a", 10, 2)]);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(0).unwrap().quantity.get(), 3);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = sample();
        assert!(cart.set_quantity(1, Quantity::new(6)));
        assert_eq!(cart.get(1).unwrap().quantity.get(), 6);
        assert!(!cart.set_quantity(9, Quantity::new(6)));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = Cart::from_lines(vec![line("a", 1, 1), line("b", 1, 1), line("c", 1, 1)]);
        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        let ids: Vec<_> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut cart = sample();
        assert!(cart.remove(2).is_none());
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_grand_total_and_count() {
        let cart = sample();
        assert_eq!(cart.grand_total(), Price::from(25));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(Cart::new().grand_total(), Price::ZERO);
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&Cart::new()).unwrap();
        assert_eq!(json, "[]");
    }
}
