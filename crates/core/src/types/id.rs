//! Line item identity.
//!
//! Items are identified by an opaque string key. Buttons normally carry an
//! explicit `data-id`; when they don't, the key is derived from the title so
//! repeated clicks on the same untagged book still merge into one line.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identity key for a cart line.
///
/// ## Examples
///
/// ```
/// use bookstore_cart_core::ItemId;
///
/// assert_eq!(ItemId::slug("The  Rust Book").as_str(), "the-rust-book");
/// assert_eq!(ItemId::new("isbn-42").as_str(), "isbn-42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an explicit identifier as-is.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an identifier from a display title.
    ///
    /// Lowercases the title and replaces every run of whitespace with a single
    /// `-`. Leading and trailing whitespace runs are kept as dashes.
    #[must_use]
    pub fn slug(title: &str) -> Self {
        let mut slug = String::with_capacity(title.len());
        let mut in_whitespace = false;

        for c in title.chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    slug.push('-');
                }
                in_whitespace = true;
            } else {
                slug.extend(c.to_lowercase());
                in_whitespace = false;
            }
        }

        Self(slug)
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Accepts a string or a number; anything else decodes as the empty id.
impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self(super::item::scalar_text(value).unwrap_or_default()))
    }
}
