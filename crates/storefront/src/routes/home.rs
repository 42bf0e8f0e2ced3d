//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use bookstore_cart_core::{PriceFormat, WidgetConfig};
use tracing::instrument;

use crate::catalog::Book;
use crate::filters;
use crate::state::AppState;

/// Book card display data for templates.
///
/// Every field ends up in a `data-*` attribute of the card's add button,
/// which is all the cart widget reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCardView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// Plain decimal for `data-price`, e.g. `12.5`.
    pub price: String,
    /// Formatted for display, e.g. `₹12.50`.
    pub display_price: String,
    pub image: Option<String>,
}

impl BookCardView {
    fn new(book: &Book, format: &PriceFormat) -> Self {
        Self {
            id: book.item_id().to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            publisher: book.publisher.clone(),
            price: book.price.amount().to_string(),
            display_price: format.format(book.price),
            image: book.image.clone().filter(|url| !url.is_empty()),
        }
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub books: Vec<BookCardView>,
    /// Published to the widget as `window.cartConfig`.
    pub cart_config: WidgetConfig,
}

/// Display the catalog.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let format = state.price_format();
    let books = state
        .catalog()
        .books()
        .iter()
        .map(|book| BookCardView::new(book, &format))
        .collect();

    HomeTemplate {
        books,
        cart_config: state.widget_config().clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn books() -> Vec<BookCardView> {
        let catalog = Catalog::from_yaml(
            r#"
books:
  - title: "Tom & Jerry <Annotated>"
    author: Anon
    price: "7.5"
    image: ""
"#,
        )
        .unwrap();
        catalog
            .books()
            .iter()
            .map(|book| BookCardView::new(book, &PriceFormat::default()))
            .collect()
    }

    #[test]
    fn test_book_card_view() {
        let card = books().pop().unwrap();
        assert_eq!(card.id, "tom-&-jerry-<annotated>");
        assert_eq!(card.price, "7.5");
        assert_eq!(card.display_price, "₹7.50");
        assert!(card.image.is_none());
    }

    #[test]
    fn test_home_template_marks_up_add_controls() {
        let html = HomeTemplate {
            books: books(),
            cart_config: WidgetConfig::default(),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"class="book-card""#));
        assert!(html.contains("add-to-cart-btn"));
        assert!(html.contains(r#"data-price="7.5""#));
        assert!(html.contains("Jerry"));
        assert!(!html.contains("<Annotated>"));
        assert!(!html.contains("Tom & Jerry"));
    }
}
