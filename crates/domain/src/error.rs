//! Domain error types

use thiserror::Error;

/// Errors found while validating suite configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The `api.base_url` entry is missing or empty.
    #[error("configuration has no usable base URL; set api.base_url")]
    MissingBaseUrl,

    /// The `api.base_url` entry is not a parseable URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The offending value.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The configured timeout is not a positive number of seconds.
    #[error("invalid timeout {0}: must be a positive number of seconds")]
    InvalidTimeout(f64),
}

/// A response body could not be decoded as JSON.
///
/// Kept distinct from assertion failures so callers can tell "the value was
/// wrong" apart from "there was no JSON to look at".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("response body is not valid JSON: {reason}")]
pub struct DecodeError {
    /// Parser diagnostic.
    pub reason: String,
}
