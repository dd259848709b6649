//! Apicheck Client - HTTP plumbing for the API test suite
//!
//! This crate provides the pieces the test suite calls into: the configured
//! [`ApiClient`] wrapper around reqwest, YAML loaders for configuration and
//! data-driven test cases, the response assertion utilities, and logging
//! initialization.

pub mod api;
pub mod assertions;
pub mod config_loader;
pub mod data_loader;
pub mod error;
pub mod logging;

pub use api::{ApiClient, RequestOptions};
pub use assertions::{
    assert_error_message, assert_json_keys_exist, assert_json_value,
    assert_payload_in_response, assert_status_code, AssertionError,
};
pub use config_loader::load_config;
pub use data_loader::load_test_cases;
pub use error::{ClientError, LoadError, TransportError};
pub use logging::init_logging;
