//! Authentication service.
//!
//! Accounts are plain credential records kept in the local store under the
//! username, next to a single session flag. There is no hashing and no
//! expiry: this is a demo storefront, not an identity provider.

mod error;

pub use error::AuthError;

use core::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use quickcart_core::Username;

use crate::storage::{KeyValueStore, keys};

/// A stored account.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// The account's username, also its storage key.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Credential store and session flag over a [`KeyValueStore`].
#[derive(Debug)]
pub struct CredentialStore<S> {
    store: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    /// Create a credential store over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new account and start a session for it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username fails validation.
    /// Returns `AuthError::WeakPassword` if the password is empty.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken; the
    /// existing record is left untouched.
    #[instrument(skip(self, password))]
    pub fn sign_up(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<Username, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;

        if self.store.get(username.as_str())?.is_some() {
            warn!(username = %username, "Sign-up rejected, username taken");
            return Err(AuthError::UserAlreadyExists);
        }

        let record = CredentialRecord {
            username: username.as_str().to_owned(),
            password: password.expose_secret().to_owned(),
        };
        let encoded = serde_json::to_string(&record).map_err(|source| AuthError::CorruptRecord {
            username: record.username.clone(),
            source,
        })?;

        self.store.set(username.as_str(), &encoded)?;
        if let Err(e) = self.set_session_flag() {
            // Drop the record written above; the sign-up as a whole failed.
            if let Err(undo) = self.store.remove(username.as_str()) {
                warn!(username = %username, error = %undo, "Could not roll back sign-up");
            }
            return Err(e);
        }

        info!(username = %username, "Account created");
        Ok(username)
    }

    /// Check a username and password and start a session.
    ///
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller. The session flag is only written on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the account does not exist
    /// or the password does not match.
    #[instrument(skip(self, password))]
    pub fn sign_in(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<Username, AuthError> {
        let Ok(username) = Username::parse(username) else {
            return Err(AuthError::InvalidCredentials);
        };

        let record = self
            .record(&username)?
            .ok_or(AuthError::InvalidCredentials)?;

        if record.password != password.expose_secret() {
            warn!(username = %username, "Sign-in rejected, password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        self.set_session_flag()?;
        info!(username = %username, "Signed in");
        Ok(username)
    }

    /// End the session. Credential records are not touched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the flag cannot be removed.
    #[instrument(skip(self))]
    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.store.remove(keys::SESSION_FLAG)?;
        info!("Signed out");
        Ok(())
    }

    /// Whether a session is active.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the flag cannot be read.
    pub fn is_signed_in(&self) -> Result<bool, AuthError> {
        let flag = self.store.get(keys::SESSION_FLAG)?;
        Ok(flag.as_deref() == Some(keys::SESSION_ACTIVE))
    }

    /// Look up the stored record for `username`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CorruptRecord` if the stored value is not a
    /// credential record.
    pub fn record(&self, username: &Username) -> Result<Option<CredentialRecord>, AuthError> {
        let Some(raw) = self.store.get(username.as_str())? else {
            debug!(username = %username, "No credential record");
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| AuthError::CorruptRecord {
                username: username.as_str().to_owned(),
                source,
            })
    }

    /// Borrow the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn set_session_flag(&mut self) -> Result<(), AuthError> {
        self.store
            .set(keys::SESSION_FLAG, keys::SESSION_ACTIVE)
            .map_err(AuthError::from)
    }
}

/// Reject passwords the sign-up form would not submit.
fn validate_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().is_empty() {
        return Err(AuthError::WeakPassword(
            "password cannot be empty".to_string(),
        ));
    }

    Ok(())
}
