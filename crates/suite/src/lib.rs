//! Apicheck Suite - session wiring and shared scenarios
//!
//! Tests do not construct clients themselves: a [`Session`] loads the
//! configuration, initializes logging and builds the one shared
//! [`ApiClient`] for the run, which test bodies then receive explicitly.
//! There is no module-level singleton.

use std::env;
use std::path::{Path, PathBuf};

use apicheck_client::{
    init_logging, load_config, ApiClient, AssertionError, ClientError, LoadError, TransportError,
};
use apicheck_domain::{ApiConfig, SuiteConfig};
use thiserror::Error;

pub mod scenario;

pub use scenario::run_create_user_case;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "APICHECK_CONFIG";

/// Anything that can go wrong while running the suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// A YAML input failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The client could not be constructed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A network call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response assertion failed.
    #[error(transparent)]
    Assertion(#[from] AssertionError),
}

/// One test session: the loaded configuration and the shared client.
#[derive(Debug, Clone)]
pub struct Session {
    config: SuiteConfig,
    client: ApiClient,
}

impl Session {
    /// Opens a session from the configuration file.
    ///
    /// The path comes from `APICHECK_CONFIG` when set, otherwise
    /// `config/config.yaml` at the workspace root. Logging is initialized
    /// from the loaded `logging` section.
    ///
    /// # Errors
    ///
    /// Fails fatally when the configuration is missing, unparseable, or
    /// lacks a usable base URL.
    pub fn open() -> Result<Self, SuiteError> {
        let path = env::var(CONFIG_ENV_VAR)
            .map_or_else(|_| default_config_path(), PathBuf::from);
        Self::from_config_file(&path)
    }

    /// Opens a session from an explicit configuration file.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Session::open`].
    pub fn from_config_file(path: &Path) -> Result<Self, SuiteError> {
        let config = load_config(path)?;
        init_logging(&config.logging);
        let client = ApiClient::from_config(&config.api)?;
        tracing::info!("session opened");
        Ok(Self { config, client })
    }

    /// Opens a session pointed at an ad-hoc base URL, with default headers
    /// and timeout. Used to run the same scenarios against a mock server;
    /// the logging subscriber is left untouched.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` is empty or unparseable.
    pub fn for_base_url(base_url: impl Into<String>) -> Result<Self, SuiteError> {
        let api = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        let client = ApiClient::from_config(&api)?;
        Ok(Self {
            config: SuiteConfig {
                api,
                ..SuiteConfig::default()
            },
            client,
        })
    }

    /// The shared client for this session.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }
}

/// Returns `config/config.yaml` at the workspace root.
#[must_use]
pub fn default_config_path() -> PathBuf {
    workspace_root().join("config/config.yaml")
}

/// Returns `data/user_creation_data.yaml` at the workspace root.
#[must_use]
pub fn user_creation_data_path() -> PathBuf {
    workspace_root().join("data/user_creation_data.yaml")
}

/// The workspace root, two levels above this crate's manifest.
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
