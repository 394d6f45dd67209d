//! CLI command implementations.

pub mod account;
pub mod catalog;
pub mod shell;

use thiserror::Error;

use quickcart_storefront::Storefront;
use quickcart_storefront::config::StorefrontConfig;
use quickcart_storefront::storage::{FileStore, StorageError};
use quickcart_storefront::StorefrontError;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CliError {
    /// The local store could not be opened.
    #[error("Could not open local storage: {0}")]
    Storage(#[from] StorageError),

    /// A storefront action failed. The message is the user-facing alert.
    #[error("{}", .0.alert_message())]
    Storefront(#[from] StorefrontError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the storefront over the configured file store.
///
/// # Errors
///
/// Returns `CliError` if the store file is unreadable or corrupt.
pub fn open_storefront(config: &StorefrontConfig) -> Result<Storefront<FileStore>, CliError> {
    let store = FileStore::open(&config.storage_path)?;
    Ok(Storefront::new(store)?)
}

/// Log a failed storefront action and turn it into a `CliError`.
fn fail(err: StorefrontError) -> CliError {
    err.report();
    CliError::Storefront(err)
}
