//! Apicheck Domain - Core types for the API test suite
//!
//! This crate defines the data model shared by the client wrapper and the
//! assertion utilities. All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod path;
pub mod response;
pub mod testcase;

pub use config::{ApiConfig, LoggingConfig, SuiteConfig};
pub use error::{ConfigError, DecodeError};
pub use path::{json_type_name, resolve, NavigationError};
pub use response::ResponseSpec;
pub use testcase::TestCaseRecord;
