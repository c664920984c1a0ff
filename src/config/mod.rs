//! Layered configuration for the test suite.
//!
//! This module handles:
//! - JSON config file parsing and key flattening
//! - Layering the file over the in-memory defaults
//! - Typed lookups against the merged view

pub mod loader;
pub mod types;

pub use loader::{CONFIG_FILE_NAME, load_config_file, load_settings, parse_config_str};
pub use types::{Settings, default_settings};
