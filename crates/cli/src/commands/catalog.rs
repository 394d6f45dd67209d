//! Catalog listing.

use std::io::{self, Write};

use tracing::info;

use quickcart_storefront::catalog::{Catalog, CatalogClient, LoadState};
use quickcart_storefront::config::StorefrontConfig;

use super::CliError;

/// Fetch the catalog and print it.
///
/// A failed fetch is not an error here: it prints the empty catalog and the
/// reason, the same as the shell does.
///
/// # Errors
///
/// Returns `CliError::Io` if writing to stdout fails.
pub async fn list(config: &StorefrontConfig) -> Result<(), CliError> {
    let client = CatalogClient::new(&config.catalog);
    info!(endpoint = %client.endpoint(), "Fetching catalog");

    let mut catalog = Catalog::new();
    catalog.load(&client).await;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_catalog(&mut out, &catalog)?;
    out.flush()?;
    Ok(())
}

/// Render a catalog as a table.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_catalog(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    match catalog.state() {
        LoadState::Loading => return writeln!(out, "Loading..."),
        LoadState::Failed(reason) => writeln!(out, "Could not load products: {reason}")?,
        LoadState::Loaded => {}
    }

    if catalog.products().is_empty() {
        return writeln!(out, "No products.");
    }

    for product in catalog.products() {
        writeln!(out, "{:>4}  {:<40} {}", product.id, product.title, product.price)?;
    }
    Ok(())
}
