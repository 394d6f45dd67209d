//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username failed validation.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] quickcart_core::UsernameError),

    /// Wrong password or user not found.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password rejected by validation.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// A record already exists for this username.
    #[error("user already exists")]
    UserAlreadyExists,

    /// A stored credential record could not be decoded.
    #[error("credential record for '{username}' is corrupt: {source}")]
    CorruptRecord {
        /// Key of the unreadable record.
        username: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Storage read or write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
