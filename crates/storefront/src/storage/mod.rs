//! Local key-value storage.
//!
//! The storefront keeps its durable state (credential records and the
//! session flag) in a flat string-to-string store, the same shape as a
//! browser's local storage. Everything that touches it goes through
//! [`KeyValueStore`] so tests can swap in [`MemoryStore`].
//!
//! # Keys
//!
//! - `<username>` - JSON credential record, see [`crate::services::auth`]
//! - [`keys::SESSION_FLAG`] - `"true"` while a session is active, absent otherwise

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// A string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Well-known storage keys.
pub mod keys {
    /// Key holding the session flag.
    pub const SESSION_FLAG: &str = "isLoggedIn";

    /// Value stored under [`SESSION_FLAG`] while signed in.
    pub const SESSION_ACTIVE: &str = "true";
}
