//! Suite configuration model
//!
//! Typed view of `config/config.yaml`. The configuration is loaded once at
//! session start and owned, read-only, by the client for the rest of the run.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Root configuration for a test run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Target API settings.
    pub api: ApiConfig,
    /// Logging sink settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings applied uniformly to every request the client sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint fragment is concatenated onto.
    pub base_url: String,
    /// Default headers, merged under any per-call headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Default request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout: f64,
}

fn default_timeout_secs() -> f64 {
    10.0
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            headers: BTreeMap::new(),
            timeout: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Validates the configuration ahead of client construction.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is absent, unparseable, or the
    /// timeout is not positive. Construction must not proceed with a
    /// partially usable configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !self.timeout.is_finite() || self.timeout <= 0.0 {
            return Err(ConfigError::InvalidTimeout(self.timeout));
        }
        Ok(())
    }

    /// Returns the default timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout)
    }
}

/// Logging sink configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written to the sinks (trace, debug, info, warn, error).
    #[serde(default = "default_level")]
    pub level: String,
    /// File rotation cadence: "daily", "hourly" or "never".
    #[serde(default = "default_rotation")]
    pub rotation: String,
    /// Days to keep rotated log files before the startup sweep deletes them.
    #[serde(default = "default_retention", rename = "retention")]
    pub retention_days: u64,
    /// Log file path; rotated files share its directory and stem.
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,
}

fn default_level() -> String {
    "info".to_owned()
}

fn default_rotation() -> String {
    "daily".to_owned()
}

const fn default_retention() -> u64 {
    7
}

fn default_file_path() -> PathBuf {
    PathBuf::from("logs/runtime.log")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            rotation: default_rotation(),
            retention_days: default_retention(),
            file_path: default_file_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_api_config() -> ApiConfig {
        ApiConfig {
            base_url: "https://reqres.in/api".to_owned(),
            headers: BTreeMap::new(),
            timeout: 10.0,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(valid_api_config().validate(), Ok(()));
    }

    #[test]
    fn test_empty_base_url_is_fatal() {
        let config = ApiConfig {
            base_url: "  ".to_owned(),
            ..valid_api_config()
        };
        assert_eq!(config.validate(), Err(ConfigError::MissingBaseUrl));
    }

    #[test]
    fn test_unparseable_base_url_is_fatal() {
        let config = ApiConfig {
            base_url: "not a url".to_owned(),
            ..valid_api_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_non_positive_timeout_is_fatal() {
        let config = ApiConfig {
            timeout: 0.0,
            ..valid_api_config()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeout(0.0)));
    }

    #[test]
    fn test_timeout_duration() {
        let config = ApiConfig {
            timeout: 2.5,
            ..valid_api_config()
        };
        assert_eq!(config.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = "api:\n  base_url: https://reqres.in/api\n";
        let config: SuiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.timeout, 10.0);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.retention_days, 7);
        assert_eq!(config.logging.file_path, PathBuf::from("logs/runtime.log"));
    }
}
