//! Unified error handling with Sentry integration.
//!
//! Every failure in the storefront is recoverable: it ends up in front of
//! the user as an alert and the state stays as it was. [`StorefrontError`]
//! gathers the per-component errors and knows the alert text for each.

use thiserror::Error;

use crate::orders::OrderError;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// The action needs a signed-in session.
    #[error("Not signed in")]
    NotSignedIn,

    /// The referenced product is not in the loaded catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
}

impl StorefrontError {
    /// Whether this is an internal failure rather than a validation problem.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::Storage(_) | AuthError::CorruptRecord { .. })
        )
    }

    /// The alert shown to the user.
    ///
    /// Internal failures get a generic message; their details only go to the
    /// log and error tracking.
    #[must_use]
    pub fn alert_message(&self) -> String {
        match self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid username or password".to_string(),
                AuthError::UserAlreadyExists => {
                    "Username already exists. Please choose a different one.".to_string()
                }
                AuthError::InvalidUsername(e) => format!("Invalid username: {e}"),
                AuthError::WeakPassword(msg) => format!("Invalid password: {msg}"),
                AuthError::CorruptRecord { .. } | AuthError::Storage(_) => {
                    "Something went wrong. Please try again.".to_string()
                }
            },
            Self::Order(err) => match err {
                OrderError::EmptyCart => {
                    "Please add items to the cart before placing an order.".to_string()
                }
                OrderError::MissingShippingAddress => {
                    "Please enter your shipping address.".to_string()
                }
                OrderError::NotFound(id) => format!("Order ID: {id} not found."),
                OrderError::InvalidTransition { id, from, to } => {
                    format!("Order ID: {id} cannot go from {from} to {to}.")
                }
                OrderError::AlreadyFinal { id, status } => {
                    format!("Order ID: {id} is already {status}.")
                }
                OrderError::NotCancellable { id, status } => {
                    format!("Order ID: {id} cannot be cancelled while {status}.")
                }
            },
            Self::NotSignedIn => "Please sign in first.".to_string(),
            Self::UnknownProduct(id) => format!("No product with ID {id}."),
        }
    }

    /// Log the error and, for internal failures, report it to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "Validation failure");
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
