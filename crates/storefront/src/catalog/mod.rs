//! Product catalog.
//!
//! The catalog is loaded once per main page from a public product listing
//! endpoint (`https://dummyjson.com/products` by default). A failed load is
//! not an error for the caller: it is logged, and the page shows an empty
//! catalog.
//!
//! # Example
//!
//! ```rust,ignore
//! use quickcart_storefront::catalog::{Catalog, CatalogClient};
//!
//! let client = CatalogClient::new(&config.catalog);
//! let mut catalog = Catalog::new();
//! catalog.load(&client).await;
//!
//! for product in catalog.products() {
//!     println!("{} - {}", product.title, product.price);
//! }
//! ```

mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{Product, ProductList};

use quickcart_core::ProductId;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("catalog endpoint returned {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where a catalog load stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Waiting on the endpoint. Catalogs start here.
    #[default]
    Loading,
    /// Products arrived.
    Loaded,
    /// The load failed; the message is kept for display.
    Failed(String),
}

/// The products shown on the main page, plus their loading state.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    state: LoadState,
    products: Vec<Product>,
}

impl Catalog {
    /// An empty catalog that has not been loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the product list and record the outcome.
    pub async fn load(&mut self, client: &CatalogClient) {
        self.state = LoadState::Loading;
        let result = client.fetch_products().await;
        self.apply(result);
    }

    /// Record the outcome of a fetch.
    ///
    /// On failure the product list is emptied and the error is logged; it is
    /// never handed back to the caller.
    pub fn apply(&mut self, result: Result<Vec<Product>, CatalogError>) {
        match result {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.products = products;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching catalog");
                self.products.clear();
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Whether a load is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Current load state.
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// Message of the last failed load, if the last load failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            LoadState::Loading | LoadState::Loaded => None,
        }
    }

    /// Products in listing order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
