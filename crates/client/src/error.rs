//! Client-side error types

use std::path::PathBuf;

use apicheck_domain::ConfigError;
use thiserror::Error;

/// Errors raised while constructing the client.
///
/// All of these are fatal: the suite aborts before any test runs rather
/// than proceeding with a degraded client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

/// Failures in the underlying network call, distinct from application-level
/// error responses. Never retried, never transformed into a response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_ms}ms")]
    Timeout {
        /// Target URL.
        url: String,
        /// Effective timeout for the call.
        timeout_ms: u64,
    },

    /// The remote host actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Name resolution failed.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Resolver diagnostic.
        message: String,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The concatenated base URL + endpoint is not a valid URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// Errors loading YAML inputs (configuration or test data).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for the expected shape.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// Offending path.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
}
