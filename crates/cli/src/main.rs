//! Quickcart CLI - storefront accounts, catalog and interactive shell.
//!
//! # Usage
//!
//! ```bash
//! # Interactive shell (default)
//! quickcart
//! quickcart shell
//!
//! # One-shot account commands
//! quickcart sign-up -u alice -p pw1
//! quickcart sign-in -u alice -p pw1
//! quickcart sign-out
//! quickcart status
//!
//! # List the product catalog
//! quickcart catalog
//! ```
//!
//! # Environment Variables
//!
//! - `QUICKCART_CATALOG_URL` - Product listing endpoint
//! - `QUICKCART_STORAGE_PATH` - Local store file
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT` - Error tracking
//! - `RUST_LOG` - Log filter (default: `quickcart=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quickcart_storefront::catalog::CatalogClient;
use quickcart_storefront::config::StorefrontConfig;

mod commands;

use commands::CliError;
use commands::shell::Shell;

#[derive(Parser)]
#[command(name = "quickcart")]
#[command(author, version, about = "Quickcart storefront")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    SignUp {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign in to an existing account
    SignIn {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// End the current session
    SignOut,
    /// Show whether a session is active
    Status,
    /// Fetch and list the product catalog
    Catalog,
    /// Start an interactive session
    Shell,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Configuration error: {e}");
            }
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so they never interleave with command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quickcart=info,quickcart_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    match cli.command.unwrap_or(Commands::Shell) {
        Commands::SignUp { username, password } => {
            commands::account::sign_up(config, &username, &SecretString::from(password))?;
        }
        Commands::SignIn { username, password } => {
            commands::account::sign_in(config, &username, &SecretString::from(password))?;
        }
        Commands::SignOut => commands::account::sign_out(config)?,
        Commands::Status => commands::account::status(config)?,
        Commands::Catalog => commands::catalog::list(config).await?,
        Commands::Shell => {
            let mut app = commands::open_storefront(config)?;
            let client = CatalogClient::new(&config.catalog);
            let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock(), client);
            shell.run(&mut app).await?;
        }
    }
    Ok(())
}
