//! Widget configuration: storage key, currency and DOM selectors.
//!
//! Pages differ in how they mark up the cart, so every DOM role is matched
//! through an ordered list of CSS selectors; the first selector that matches
//! wins. Defaults cover the bookstore's existing markup. A page may override
//! any subset by publishing a `window.cartConfig` object, which is decoded
//! here with every missing field falling back to its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::CART_STORAGE_KEY;
use crate::types::{DEFAULT_CURRENCY_SYMBOL, PriceFormat};

/// Errors decoding a configuration override.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid cart configuration: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("Selector list for {0} is empty")]
    EmptySelectors(&'static str),
    #[error("Selector for {0} must be a single class, got {1:?}")]
    NotAClass(&'static str, String),
}

/// Top-level widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Storage key holding the cart blob.
    pub storage_key: String,
    /// Currency symbol prefixed to every displayed amount.
    pub currency_symbol: String,
    /// DOM selectors per role.
    pub selectors: SelectorConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: CART_STORAGE_KEY.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Decode an override from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed or a selector role ends
    /// up with no selectors.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.selectors.validate()?;
        Ok(config)
    }

    /// Price format for this configuration.
    #[must_use]
    pub fn price_format(&self) -> PriceFormat {
        PriceFormat::new(self.currency_symbol.clone())
    }
}

/// Ordered selector fallbacks for each DOM role the widget touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Container the cart rows are rendered into.
    pub items_container: Vec<String>,
    /// Element showing the grand total.
    pub total_display: Vec<String>,
    /// Optional element shown only when the cart is empty.
    pub empty_indicator: Vec<String>,
    /// "Add to cart" controls. Unlike the other roles, every selector is
    /// applied and all matches are bound.
    pub add_trigger: Vec<String>,
    /// Ancestors of an add trigger that scope the quantity lookup, nearest
    /// match of the first selector wins.
    pub group_scope: Vec<String>,
    /// Quantity controls looked up inside a trigger's scope.
    pub quantity_input: Vec<String>,
    /// Quantity control rendered in each cart row.
    pub row_quantity: String,
    /// Remove control rendered in each cart row.
    pub row_remove: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            items_container: owned(&["#cart-items", "tbody#cart-items", "tbody[data-cart-items]"]),
            total_display: owned(&["#cart-total", "[data-cart-total]", "#totalAmount"]),
            empty_indicator: owned(&["#cart-empty-message", "[data-cart-empty]"]),
            add_trigger: owned(&[".add-to-cart-btn", "[data-add-to-cart]"]),
            group_scope: owned(&["tr", ".book-card"]),
            quantity_input: owned(&[".quantity-input", "input[type=\"number\"]", "[data-qty]"]),
            row_quantity: ".quantity-input".to_string(),
            row_remove: ".remove-from-cart".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Check that every role has at least one selector and that the row
    /// controls are plain `.class` selectors, since rows are rendered with
    /// that class.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptySelectors` naming the first empty role, or
    /// `ConfigError::NotAClass` for a row control that is not `.class`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roles: [(&'static str, &[String]); 4] = [
            ("items_container", &self.items_container),
            ("total_display", &self.total_display),
            ("add_trigger", &self.add_trigger),
            ("quantity_input", &self.quantity_input),
        ];
        for (role, selectors) in roles {
            if selectors.is_empty() {
                return Err(ConfigError::EmptySelectors(role));
            }
        }
        check_row_class("row_quantity", &self.row_quantity)?;
        check_row_class("row_remove", &self.row_remove)
    }

    /// Class name of the row quantity control, for rendering.
    #[must_use]
    pub fn row_quantity_class(&self) -> &str {
        class_name(&self.row_quantity)
    }

    /// Class name of the row remove control, for rendering.
    #[must_use]
    pub fn row_remove_class(&self) -> &str {
        class_name(&self.row_remove)
    }
}

fn owned(selectors: &[&str]) -> Vec<String> {
    selectors.iter().map(|s| (*s).to_string()).collect()
}

fn check_row_class(role: &'static str, selector: &str) -> Result<(), ConfigError> {
    if selector.is_empty() {
        return Err(ConfigError::EmptySelectors(role));
    }
    if !is_single_class(selector) {
        return Err(ConfigError::NotAClass(role, selector.to_string()));
    }
    Ok(())
}

/// `.name` where `name` is a non-empty run of `[A-Za-z0-9_-]`.
fn is_single_class(selector: &str) -> bool {
    selector.strip_prefix('.').is_some_and(|name| {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

/// Strip a leading `.` from a single-class selector.
fn class_name(selector: &str) -> &str {
    selector.strip_prefix('.').unwrap_or(selector)
}
