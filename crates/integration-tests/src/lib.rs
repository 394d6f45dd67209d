//! Integration tests for Quickcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quickcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flow` - Sign-up, sign-in and sign-out across the app and store
//! - `order_lifecycle` - Cart to order to delivery or cancellation
//! - `catalog_fetch` - Catalog loading against a local HTTP server
//! - `file_store` - Persistence of accounts and session across reopen
//!
//! Network tests never leave the machine: [`CatalogServer`] serves canned
//! responses from `127.0.0.1` on a free port.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

use quickcart_storefront::catalog::CatalogClient;

/// A local catalog server.
///
/// # Routes
///
/// - `/products` - three products, with extra fields the client ignores
/// - `/empty` - an empty product list
/// - `/broken` - HTTP 500
/// - `/garbage` - HTTP 200 with a body that is not JSON
#[derive(Debug, Clone)]
pub struct CatalogServer {
    addr: SocketAddr,
    base: Url,
}

impl CatalogServer {
    /// Bind to a free port on loopback and serve in the background.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn spawn() -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base = Url::parse(&format!("http://{addr}")).map_err(std::io::Error::other)?;

        let app = Router::new()
            .route("/products", get(|| async { axum::Json(sample_products()) }))
            .route("/empty", get(|| async { axum::Json(json!({ "products": [] })) }))
            .route(
                "/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/garbage", get(garbage));

        tokio::spawn(async move {
            // The server lives as long as the test runtime.
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, base })
    }

    /// Address the server listens on.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL of `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url
    }

    /// A catalog client pointed at `path` on this server.
    #[must_use]
    pub fn client(&self, path: &str) -> CatalogClient {
        CatalogClient::with_endpoint(self.url(path))
    }
}

async fn garbage() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        "{\"products\": [",
    )
}

/// Body served at `/products`.
#[must_use]
pub fn sample_products() -> Value {
    json!({
        "products": [
            {
                "id": 1,
                "title": "Essence Mascara Lash Princess",
                "description": "Volumizing mascara.",
                "category": "beauty",
                "price": 9.99,
                "rating": 4.94,
                "thumbnail": "https://cdn.example.com/1/thumbnail.png"
            },
            {
                "id": 2,
                "title": "Eyeshadow Palette with Mirror",
                "description": "Versatile palette.",
                "category": "beauty",
                "price": 19.99,
                "thumbnail": "https://cdn.example.com/2/thumbnail.png"
            },
            {
                "id": 3,
                "title": "Red Lipstick",
                "description": "Classic red.",
                "category": "beauty",
                "price": 12,
                "thumbnail": "https://cdn.example.com/3/thumbnail.png"
            }
        ],
        "total": 3,
        "skip": 0,
        "limit": 30
    })
}

/// Wrap a test password.
#[must_use]
pub fn secret(password: &str) -> SecretString {
    SecretString::from(password.to_owned())
}
