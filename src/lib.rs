//! Shared configuration harness for the MySQL client side-by-side test suite.
//!
//! This library provides the plumbing every test in the suite depends on:
//! - Repository-root discovery by walking up from the test executable
//! - A layered configuration view (in-memory defaults under `config.json`)
//! - Typed accessors for connection strings, users, and file paths
//! - A server feature-flag set parsed from configuration
//! - `%TESTDATA%` placeholder expansion in path-valued settings
//!
//! # Example
//!
//! ```no_run
//! use mysql_test_config::TestConfig;
//!
//! let config = TestConfig::load().unwrap();
//! let connection = config.connection_string().unwrap();
//! if config.supports_json().unwrap() {
//!     println!("JSON column tests enabled; connecting to {connection}");
//! }
//! ```
//!
//! Every failure is fatal by design: a broken test-configuration environment
//! must stop the suite rather than let tests run against the wrong server.

pub mod config;
pub mod connection;
pub mod error;
pub mod features;
pub mod harness;
pub mod paths;

pub use connection::ConnectionStringBuilder;
pub use error::{HarnessError, Result};
pub use features::ServerFeatures;
pub use harness::{OnceFlag, TestConfig};
pub use paths::{PROJECT_DIR_NAME, TEST_DATA_TOKEN, TestPaths, find_code_root};
