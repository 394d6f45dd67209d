//! Catalog wire and domain types.

use serde::{Deserialize, Serialize};

use quickcart_core::{Price, ProductId};

/// A product summary as listed in the catalog.
///
/// Fields beyond these are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
    pub price: Price,
}

/// Response body of the product listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}
