//! One-shot account commands.
//!
//! # Usage
//!
//! ```bash
//! quickcart sign-up -u alice -p pw1
//! quickcart sign-out
//! quickcart sign-in -u alice -p pw1
//! quickcart status
//! ```

use secrecy::SecretString;
use tracing::info;

use quickcart_storefront::config::StorefrontConfig;
use quickcart_storefront::router::View;

use super::{CliError, fail, open_storefront};

/// Create an account and start a session.
///
/// # Errors
///
/// Returns `CliError` if the username is invalid or taken, or storage fails.
pub fn sign_up(
    config: &StorefrontConfig,
    username: &str,
    password: &SecretString,
) -> Result<(), CliError> {
    let mut app = open_storefront(config)?;
    let username = app.sign_up(username, password).map_err(fail)?;

    info!(%username, "Account created");
    #[allow(clippy::print_stdout)]
    {
        println!("Signed up and signed in as {username}");
    }
    Ok(())
}

/// Sign in to an existing account.
///
/// # Errors
///
/// Returns `CliError` if the credentials do not match, or storage fails.
pub fn sign_in(
    config: &StorefrontConfig,
    username: &str,
    password: &SecretString,
) -> Result<(), CliError> {
    let mut app = open_storefront(config)?;
    let username = app.sign_in(username, password).map_err(fail)?;

    info!(%username, "Signed in");
    #[allow(clippy::print_stdout)]
    {
        println!("Signed in as {username}");
    }
    Ok(())
}

/// End the current session.
///
/// # Errors
///
/// Returns `CliError` if the session flag cannot be cleared.
pub fn sign_out(config: &StorefrontConfig) -> Result<(), CliError> {
    let mut app = open_storefront(config)?;
    app.sign_out().map_err(fail)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Signed out");
    }
    Ok(())
}

/// Show whether a session is active.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be read.
pub fn status(config: &StorefrontConfig) -> Result<(), CliError> {
    let app = open_storefront(config)?;
    let view = match app.view() {
        View::Main => "signed in",
        View::SignIn | View::SignUp => "signed out",
    };

    #[allow(clippy::print_stdout)]
    {
        println!("Session: {view}");
        println!("Store:   {}", config.storage_path.display());
    }
    Ok(())
}
