//! Cart file commands.
//!
//! Each command loads the cart through a [`CartStore`], applies the same
//! operation the browser widget would, and writes the whole cart back.
//!
//! # Usage
//!
//! ```bash
//! # List lines and the grand total
//! cart-cli show
//!
//! # Add two copies of a book (id derived from the title)
//! cart-cli add --title "The Hobbit" --price 12.50 --quantity 2
//!
//! # Change the quantity of the first row, remove the second
//! cart-cli set-quantity 0 3
//! cart-cli remove 1
//!
//! # Write the cart table rows as HTML
//! cart-cli export-html --output rows.html
//! ```
//!
//! # Environment Variables
//!
//! - `CART_FILE` - cart file path (default `cart.json`)
//! - `CART_CURRENCY_SYMBOL` - currency symbol for totals (default `₹`)

use std::io::Write;
use std::path::Path;

use bookstore_cart_core::{
    AddOutcome, CartStore, CartView, ItemAttributes, LineItem, PriceFormat, Quantity,
    SelectorConfig, StoreError, TemplateError, add_to_cart, change_quantity, remove_line,
};
use thiserror::Error;
use tracing::info;

/// Errors from cart commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("No cart line at index {0}")]
    NoSuchLine(usize),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Log every line and the grand total.
pub fn show<S: CartStore + ?Sized>(store: &S, format: &PriceFormat) -> CartView {
    let view = CartView::build(&store.load(), format);

    if view.is_empty() {
        info!("Cart is empty");
        return view;
    }

    for row in &view.rows {
        info!(
            "[{}] {} x{} @ {} = {}",
            row.index, row.title, row.quantity, row.price, row.subtotal
        );
    }
    info!("{} ({} items)", view.total_label, view.item_count);
    view
}

/// Add an item, merging with an existing line of the same id.
///
/// # Errors
///
/// Returns `CommandError::Store` if the cart file cannot be written.
pub fn add<S: CartStore + ?Sized>(
    store: &mut S,
    attributes: ItemAttributes,
    quantity: Option<&str>,
) -> Result<AddOutcome, CommandError> {
    let outcome = add_to_cart(store, attributes, quantity)?;
    info!("{}", outcome.feedback_message());
    Ok(outcome)
}

/// Overwrite the quantity of the line at `index`.
///
/// Non-numeric or sub-1 values are stored as 1.
///
/// # Errors
///
/// Returns `CommandError::NoSuchLine` if there is no line at `index`, or
/// `CommandError::Store` if the cart file cannot be written.
pub fn set_quantity<S: CartStore + ?Sized>(
    store: &mut S,
    index: usize,
    raw: &str,
) -> Result<Quantity, CommandError> {
    let quantity =
        change_quantity(store, index, Some(raw))?.ok_or(CommandError::NoSuchLine(index))?;
    info!("Line {index} quantity set to {quantity}");
    Ok(quantity)
}

/// Remove the line at `index`. Later lines move up by one.
///
/// # Errors
///
/// Returns `CommandError::NoSuchLine` if there is no line at `index`, or
/// `CommandError::Store` if the cart file cannot be written.
pub fn remove<S: CartStore + ?Sized>(
    store: &mut S,
    index: usize,
) -> Result<LineItem, CommandError> {
    let removed = remove_line(store, index)?.ok_or(CommandError::NoSuchLine(index))?;
    info!("Removed {} from cart", removed.title);
    Ok(removed)
}

/// Delete the stored cart.
///
/// # Errors
///
/// Returns `CommandError::Store` if the cart file cannot be removed.
pub fn clear<S: CartStore + ?Sized>(store: &mut S) -> Result<(), CommandError> {
    store.clear()?;
    info!("Cart cleared");
    Ok(())
}

/// Render the cart table rows as the widget would and write them to
/// `output`, or stdout when no path is given.
///
/// # Errors
///
/// Returns `CommandError` if rendering or writing fails.
pub fn export_html<S: CartStore + ?Sized>(
    store: &S,
    format: &PriceFormat,
    output: Option<&Path>,
) -> Result<String, CommandError> {
    let view = CartView::build(&store.load(), format);
    let html = view.rows_html(&SelectorConfig::default())?;

    match output {
        Some(path) => {
            std::fs::write(path, &html)?;
            info!(rows = view.rows.len(), "Wrote cart rows to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(html)
}
