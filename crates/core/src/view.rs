//! Cart table view model and row mutations.
//!
//! A render pass turns the stored cart into a [`CartView`]; each row carries
//! its position in that pass, and the row controls are tagged with it. The
//! mutations below address lines by that position against a freshly loaded
//! cart, which is only correct because every mutation is followed by a full
//! re-render that re-numbers the rows.

use askama::Template;
use tracing::{debug, instrument};

use crate::cart::Cart;
use crate::config::SelectorConfig;
use crate::store::{CartStore, StoreError};
use crate::types::{LineItem, Price, PriceFormat, Quantity};

/// Error from rendering cart rows.
pub type TemplateError = askama::Error;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    /// Position of the line in this render pass.
    pub index: usize,
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// Cover image URL, empty for none.
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl CartRow {
    fn new(index: usize, line: &LineItem, format: &PriceFormat) -> Self {
        Self {
            index,
            id: line.id.to_string(),
            title: line.title.clone(),
            author: line.author.clone(),
            publisher: line.publisher.clone(),
            image: line.image.clone(),
            price: format.format(line.price),
            quantity: line.quantity.get(),
            subtotal: format.format(line.subtotal()),
        }
    }
}

/// Display data for the whole cart table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub grand_total: Price,
    /// `Total: ₹25.00`, or empty for an empty cart.
    pub total_label: String,
    pub item_count: u64,
}

/// Row markup template.
#[derive(Template)]
#[template(path = "cart_rows.html")]
struct CartRowsTemplate<'a> {
    rows: &'a [CartRow],
    quantity_class: &'a str,
    remove_class: &'a str,
}

impl CartView {
    /// Derive the table from a cart.
    #[must_use]
    pub fn build(cart: &Cart, format: &PriceFormat) -> Self {
        let rows: Vec<CartRow> = cart
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| CartRow::new(index, line, format))
            .collect();
        let grand_total = cart.grand_total();
        let total_label = if rows.is_empty() {
            String::new()
        } else {
            format!("Total: {}", format.format(grand_total))
        };

        Self {
            rows,
            grand_total,
            total_label,
            item_count: cart.item_count(),
        }
    }

    /// Whether the empty state should be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the `<tr>` rows for the items container.
    ///
    /// All item text is HTML-escaped.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if rendering fails.
    pub fn rows_html(&self, selectors: &SelectorConfig) -> Result<String, TemplateError> {
        CartRowsTemplate {
            rows: &self.rows,
            quantity_class: selectors.row_quantity_class(),
            remove_class: selectors.row_remove_class(),
        }
        .render()
    }
}

/// Parse the `data-index` of a row control.
#[must_use]
pub fn parse_row_index(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse().ok()
}

/// Overwrite the quantity of the line at `index` from a raw control value.
///
/// The value is normalized to an integer of at least one. Returns the stored
/// quantity, or `None` (without writing) if the line no longer exists.
///
/// # Errors
///
/// Returns `StoreError` if the cart could not be saved.
#[instrument(skip(store))]
pub fn change_quantity<S: CartStore + ?Sized>(
    store: &mut S,
    index: usize,
    raw: Option<&str>,
) -> Result<Option<Quantity>, StoreError> {
    let quantity = Quantity::parse_lenient(raw);
    let mut cart = store.load();
    if !cart.set_quantity(index, quantity) {
        debug!(index, "Quantity change for a row that no longer exists");
        return Ok(None);
    }
    store.save(&cart)?;
    Ok(Some(quantity))
}

/// Remove the line at `index`.
///
/// Returns the removed line, or `None` (without writing) if there was none.
///
/// # Errors
///
/// Returns `StoreError` if the cart could not be saved.
#[instrument(skip(store))]
pub fn remove_line<S: CartStore + ?Sized>(
    store: &mut S,
    index: usize,
) -> Result<Option<LineItem>, StoreError> {
    let mut cart = store.load();
    let Some(removed) = cart.remove(index) else {
        debug!(index, "Remove for a row that no longer exists");
        return Ok(None);
    };
    store.save(&cart)?;
    Ok(Some(removed))
}
