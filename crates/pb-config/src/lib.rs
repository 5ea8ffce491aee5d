//! # pb-config
//!
//! Layered configuration loading for the ThreatPlaybook client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PLAYBOOK_*` prefix, `__` as separator)
//! 2. Project-level `.playbook/config.toml`
//! 3. User-level `~/.config/playbook/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `PLAYBOOK_CLIENT__SCHEME` -> `client.scheme`,
//! `PLAYBOOK_CREDENTIALS__PATH` -> `credentials.path`, etc.
//!
//! The credential record (server address + token) is separate from this
//! layered configuration; see [`Credentials`].
//!
//! # Usage
//!
//! ```no_run
//! use pb_config::{Credentials, PlaybookConfig};
//!
//! let config = PlaybookConfig::load_with_dotenv().expect("config");
//! let credentials = Credentials::load(&config.credentials.path).expect("credentials");
//! let session = credentials.require_session(&config.client).expect("configured");
//! println!("API at {}", session.base_url);
//! ```

mod client;
mod credentials;
mod error;

pub use client::ClientConfig;
pub use credentials::{Credentials, CredentialsConfig, Session};
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaybookConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl PlaybookConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.client.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".playbook/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PLAYBOOK_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("playbook").join("config.toml"))
    }
}
