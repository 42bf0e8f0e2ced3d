//! Cart line items.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{ItemId, Price, Quantity};

/// Title used when a trigger carries none.
pub const UNTITLED: &str = "Untitled";

/// One line of the cart.
///
/// Serialized field-for-field into the stored cart blob. Decoding is lenient:
/// every field is optional, `null` means absent, numbers stand in for
/// strings and numeric fields are normalized, so a blob written by an older
/// or hand-edited page still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub id: ItemId,
    #[serde(deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub author: String,
    #[serde(deserialize_with = "lenient_text")]
    pub publisher: String,
    pub price: Price,
    /// Cover image URL; empty when the item has none.
    #[serde(deserialize_with = "lenient_text")]
    pub image: String,
    pub quantity: Quantity,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            id: ItemId::default(),
            title: UNTITLED.to_string(),
            author: String::new(),
            publisher: String::new(),
            price: Price::ZERO,
            image: String::new(),
            quantity: Quantity::ONE,
        }
    }
}

impl LineItem {
    /// Create a line with the given identity, title, price and quantity.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, price: Price, quantity: Quantity) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            quantity,
            ..Self::default()
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Image URL, if the line has one.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        (!self.image.is_empty()).then_some(self.image.as_str())
    }
}

/// Text form of a stored scalar. `null`, arrays and objects have none.
pub(crate) fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_else(|| UNTITLED.to_string()))
}
