//! Suite configuration loading
//!
//! Reads `config/config.yaml` into the typed [`SuiteConfig`] model. Loading
//! happens once at session start; failures here are fatal and abort the run
//! before any test executes.

use std::fs;
use std::path::Path;

use apicheck_domain::SuiteConfig;

use crate::error::LoadError;

/// Loads suite configuration from a YAML file.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] when the file is absent and
/// [`LoadError::Parse`] when it is not valid YAML for the expected shape.
/// Validation of the loaded values (usable base URL) happens at client
/// construction.
pub fn load_config(path: &Path) -> Result<SuiteConfig, LoadError> {
    tracing::debug!(path = %path.display(), "loading suite configuration");
    let text = read_file(path)?;
    let config: SuiteConfig =
        serde_yaml::from_str(&text).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");
    Ok(config)
}

pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}
