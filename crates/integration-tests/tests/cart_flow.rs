//! Integration tests for cart operations against a file-backed store.
//!
//! These run the same operations the browser widget performs, with the cart
//! persisted to disk between steps the way it would be persisted to
//! `localStorage` between page loads.

use bookstore_cart_cli::FileStore;
use bookstore_cart_cli::commands::cart::{self, CommandError};
use bookstore_cart_core::{
    CartStore, CartView, ItemAttributes, PriceFormat, SelectorConfig, add_to_cart,
    change_quantity, remove_line,
};
use bookstore_integration_tests::SAMPLE_CART;

fn sample_store(dir: &tempfile::TempDir) -> FileStore {
    let path = dir.path().join("cart.json");
    std::fs::write(&path, SAMPLE_CART).expect("should write sample cart");
    FileStore::new(path)
}

fn attributes(pairs: &[(&str, &str)]) -> ItemAttributes {
    ItemAttributes::from_lookup(|name| {
        pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| (*value).to_string())
    })
}

fn view(store: &FileStore) -> CartView {
    CartView::build(&store.load(), &PriceFormat::default())
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_sample_cart_renders_two_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = sample_store(&dir);

    let view = view(&store);
    let subtotals: Vec<&str> = view.rows.iter().map(|row| row.subtotal.as_str()).collect();
    assert_eq!(subtotals, ["₹20.00", "₹5.00"]);
    assert_eq!(view.total_label, "Total: ₹25.00");
}

#[test]
fn test_missing_cart_renders_empty_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path().join("absent.json"));

    let view = view(&store);
    assert!(view.is_empty());
    assert_eq!(view.total_label, "");
    assert_eq!(
        view.rows_html(&SelectorConfig::default())
            .expect("rows should render")
            .trim(),
        ""
    );
}

#[test]
fn test_corrupt_cart_renders_empty_and_recovers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");
    std::fs::write(&path, "[{\"id\":").expect("should write corrupt cart");
    let mut store = FileStore::new(&path);

    assert!(view(&store).is_empty());

    add_to_cart(&mut store, attributes(&[("data-title", "Dune")]), None)
        .expect("add should succeed");
    assert_eq!(view(&store).rows.len(), 1);
}

// =============================================================================
// Add to cart
// =============================================================================

#[test]
fn test_add_existing_id_merges_quantity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = sample_store(&dir);

    let outcome = add_to_cart(
        &mut store,
        attributes(&[("data-id", "a"), ("data-price", "10")]),
        Some("3"),
    )
    .expect("add should succeed");
    assert_eq!(outcome.feedback_message(), "Untitled (x3) added to cart");

    let view = view(&store);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows.first().expect("row a").quantity, 5);
    assert_eq!(view.total_label, "Total: ₹55.00");
}

#[test]
fn test_add_new_id_appends_one_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = sample_store(&dir);

    add_to_cart(
        &mut store,
        attributes(&[
            ("data-id", "c"),
            ("data-title", "C"),
            ("data-price", "2.5"),
        ]),
        Some("2"),
    )
    .expect("add should succeed");

    let cart = store.load();
    assert_eq!(cart.len(), 3);
    let ids: Vec<&str> = cart.lines().iter().map(|line| line.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(view(&store).total_label, "Total: ₹30.00");
}

#[test]
fn test_untagged_title_merges_across_adds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileStore::new(dir.path().join("cart.json"));
    let dune = [("data-title", "Dune Messiah"), ("data-price", "4")];

    add_to_cart(&mut store, attributes(&dune), None).expect("first add");
    add_to_cart(&mut store, attributes(&dune), Some("abc")).expect("second add");

    let cart = store.load();
    assert_eq!(cart.len(), 1);
    let line = cart.get(0).expect("one line");
    assert_eq!(line.id.as_str(), "dune-messiah");
    assert_eq!(line.quantity.get(), 2);
}

// =============================================================================
// Row controls
// =============================================================================

#[test]
fn test_quantity_change_normalizes_bad_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = sample_store(&dir);

    for raw in ["", "abc", "0", "-3"] {
        change_quantity(&mut store, 0, Some(raw)).expect("change should succeed");
        assert_eq!(store.load().get(0).expect("row a").quantity.get(), 1, "{raw:?}");
    }
}

#[test]
fn test_remove_keeps_relative_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = sample_store(&dir);
    add_to_cart(&mut store, attributes(&[("data-id", "c")]), None).expect("add c");

    let removed = remove_line(&mut store, 1).expect("remove should succeed");
    assert_eq!(removed.expect("row b").id.as_str(), "b");

    let cart = store.load();
    let ids: Vec<&str> = cart.lines().iter().map(|line| line.id.as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
}

#[test]
fn test_stale_index_leaves_file_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = sample_store(&dir);

    assert!(remove_line(&mut store, 5).expect("no error").is_none());
    assert!(change_quantity(&mut store, 5, Some("2")).expect("no error").is_none());

    let on_disk = std::fs::read_to_string(store.path()).expect("cart file");
    assert_eq!(on_disk, SAMPLE_CART);
}

// =============================================================================
// CLI commands
// =============================================================================

#[test]
fn test_cli_commands_share_the_widget_format() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileStore::new(dir.path().join("nested/cart.json"));

    cart::add(
        &mut store,
        attributes(&[("data-title", "Godaan"), ("data-price", "250")]),
        Some("2"),
    )
    .expect("add");
    cart::set_quantity(&mut store, 0, "3").expect("set quantity");

    let raw = std::fs::read_to_string(store.path()).expect("cart file");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");
    assert_eq!(json[0]["id"], "godaan");
    assert_eq!(json[0]["quantity"], 3);
    assert_eq!(json[0]["price"], 250.0);

    assert!(matches!(
        cart::remove(&mut store, 4),
        Err(CommandError::NoSuchLine(4))
    ));
    cart::clear(&mut store).expect("clear");
    assert!(!store.path().exists());
}
