//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── client: ClientConfig    # API URL, timeout, user agent
//! ├── session: SessionConfig  # Where the token pair is persisted
//! └── command: Command        # What to do
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//!
//! # Example
//!
//! ```bash
//! village --api-url https://desa.example.org/api events list --upcoming
//!
//! # Or via environment variables
//! VILLAGE_API_URL=https://desa.example.org/api village events list --upcoming
//! ```

mod session;

use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
pub use session::SessionConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use village_client::{ApiClient, ClientConfig, ExpiryReason, FileSessionStore};

use crate::command::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SESSION, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "village")]
#[command(about = "Village events platform client")]
#[command(version)]
pub struct Cli {
    /// Backend connection configuration.
    #[clap(flatten)]
    pub client: ClientConfig,

    /// Session persistence configuration.
    #[clap(flatten)]
    pub session: SessionConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    ///
    /// This should be called before parsing CLI arguments so that clap's `env`
    /// feature can pick up values from .env files.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr so that stdout carries only command output.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.client
            .validate()
            .context("invalid client configuration")?;
        Ok(())
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            api_url = %self.client.api_url,
            timeout_secs = self.client.effective_timeout().as_secs(),
            user_agent = %self.client.effective_user_agent(),
            session_file = %self.session.session_file.display(),
            "Client configuration"
        );
    }

    /// Builds the API client over the persisted session.
    pub fn create_client(&self) -> anyhow::Result<ApiClient> {
        let store = FileSessionStore::open(&self.session.session_file)
            .context("failed to open session file")?;

        let client = ApiClient::new(self.client.clone(), Arc::new(store))
            .context("failed to create API client")?
            .with_observer(|reason: ExpiryReason| {
                tracing::warn!(
                    target: TRACING_TARGET_SESSION,
                    reason = %reason,
                    "Session expired, run `village login` to sign in again"
                );
            });

        Ok(client)
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
