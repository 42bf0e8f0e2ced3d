//! Book catalog loaded from a YAML file at startup.
//!
//! ```yaml
//! books:
//!   - id: hobbit
//!     title: The Hobbit
//!     author: J. R. R. Tolkien
//!     publisher: Allen & Unwin
//!     price: 12.50
//!     image: /static/covers/hobbit.jpg
//! ```
//!
//! Only `title` and `price` are needed. A book without an `id` gets the same
//! title slug the cart widget derives, so catalog ids and cart ids agree.

use std::path::Path;
use std::sync::Arc;

use bookstore_cart_core::{ItemId, Price};
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// One book on sale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
}

impl Book {
    /// Cart id for this book.
    #[must_use]
    pub fn item_id(&self) -> ItemId {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map_or_else(|| ItemId::slug(&self.title), ItemId::new)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    books: Vec<Book>,
}

/// Books in display order. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Arc<Vec<Book>>,
}

impl Catalog {
    /// Load the catalog from `path`.
    ///
    /// A missing file yields an empty catalog so the cart page still works.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            tracing::warn!("Catalog file does not exist: {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("Failed to read {}: {e}", path.display())))?;
        let catalog = Self::from_yaml(&content)?;
        tracing::info!(books = catalog.len(), "Loaded catalog from {}", path.display());
        Ok(catalog)
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| CatalogError::Parse(format!("Failed to parse YAML: {e}")))?;
        Ok(Self::from(file.books))
    }

    /// All books.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl From<Vec<Book>> for Catalog {
    fn from(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(books),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const YAML: &str = r"
books:
  - id: hobbit
    title: The Hobbit
    author: J. R. R. Tolkien
    price: 12.50
  - title: War and Peace
    price: 20
";

    #[test]
    fn test_from_yaml() {
        let catalog = Catalog::from_yaml(YAML).unwrap();
        assert_eq!(catalog.len(), 2);

        let hobbit = catalog.books().first().unwrap();
        assert_eq!(hobbit.item_id().as_str(), "hobbit");
        assert_eq!(hobbit.price, Price::parse_lenient("12.5"));
        assert!(hobbit.publisher.is_empty());
    }

    #[test]
    fn test_missing_id_uses_title_slug() {
        let catalog = Catalog::from_yaml(YAML).unwrap();
        assert_eq!(catalog.books().get(1).unwrap().item_id().as_str(), "war-and-peace");
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Catalog::from_yaml("books: [title").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::load(&dir.path().join("nope.yaml")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.yaml");
        std::fs::write(&path, YAML).unwrap();
        assert_eq!(Catalog::load(&path).unwrap().len(), 2);
    }
}
