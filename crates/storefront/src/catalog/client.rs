//! HTTP client for the product listing endpoint.

use std::sync::Arc;

use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use super::types::{Product, ProductList};
use crate::config::CatalogConfig;

/// Client for the product listing endpoint.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_endpoint(config.endpoint.clone())
    }

    /// Create a client for an explicit endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint,
            }),
        }
    }

    /// The endpoint this client reads from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Fetch the product list.
    ///
    /// Issues exactly one GET. There is no retry and no timeout: a hung
    /// endpoint keeps the returned future pending.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` on transport failure,
    /// `CatalogError::Status` on a non-success response, and
    /// `CatalogError::Parse` if the body is not a product list.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog endpoint returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        let list: ProductList = match serde_json::from_str(&body) {
            Ok(list) => list,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        debug!(count = list.products.len(), "Fetched catalog");
        Ok(list.products)
    }
}
