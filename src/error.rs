use std::path::PathBuf;

/// Library-level structured errors for the test-configuration harness.
///
/// Use `thiserror` for structured errors that test code can match on.
/// Every failure here is fatal to the calling test: a broken configuration
/// environment must not silently degrade.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
	#[error("No ancestor directory named '{project}' above: {start}")]
	RootNotFound { start: PathBuf, project: String },

	#[error("Failed to locate the running executable")]
	ExeLocation {
		#[source]
		source: std::io::Error,
	},

	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("Missing configuration key: {key}")]
	MissingKey { key: String },

	#[error("Configuration key {key} is not a boolean: {value:?}")]
	InvalidBool { key: String, value: String },

	#[error("Unknown server feature name: {name:?}")]
	UnknownFeature { name: String },

	#[error("Malformed connection string segment: {segment:?}")]
	ConnectionStringSyntax { segment: String },
}

/// Result type alias using HarnessError.
pub type Result<T> = std::result::Result<T, HarnessError>;
