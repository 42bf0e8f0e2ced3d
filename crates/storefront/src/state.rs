//! Application state shared across handlers.

use std::sync::Arc;

use bookstore_cart_core::{PriceFormat, WidgetConfig};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds no cart data: the
/// cart lives in each shopper's browser.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    widget: WidgetConfig,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Books listed on the catalog page
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let widget = WidgetConfig {
            currency_symbol: config.currency_symbol.clone(),
            ..WidgetConfig::default()
        };

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                widget,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the book catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Configuration published to pages as `window.cartConfig`.
    #[must_use]
    pub fn widget_config(&self) -> &WidgetConfig {
        &self.inner.widget
    }

    /// Price format matching the widget's.
    #[must_use]
    pub fn price_format(&self) -> PriceFormat {
        self.inner.widget.price_format()
    }
}
