//! Top-level test configuration object.
//!
//! `TestConfig` replaces the usual process-wide configuration singleton with
//! an explicitly constructed, immutable value: `load()` fails fast at suite
//! startup, and every getter afterwards is a pure read (missing keys aside).
//! Test suites typically build one instance and share it behind an `Arc` or
//! a `OnceLock`.

use crate::config::{Settings, load_settings};
use crate::connection::ConnectionStringBuilder;
use crate::error::Result;
use crate::features::ServerFeatures;
use crate::paths::TestPaths;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// User name forced by the SHA-256 authentication factory.
const SHA256_USER: &str = "sha256user";

/// Password paired with [`SHA256_USER`] on the test server.
const SHA256_PASSWORD: &str = "Sh@256Pa55";

/// Atomic one-shot cell: `fire()` returns true for exactly one caller,
/// no matter how many threads race on the first access.
#[derive(Debug, Default)]
pub struct OnceFlag(AtomicBool);

impl OnceFlag {
	/// Create an unfired flag.
	pub fn new() -> OnceFlag {
		OnceFlag(AtomicBool::new(false))
	}

	/// Flip the flag, returning true only on the transition. An atomic swap
	/// is enough here: nothing else needs protecting.
	pub fn fire(&self) -> bool {
		!self.0.swap(true, Ordering::SeqCst)
	}

	/// True once any caller has fired the flag.
	pub fn fired(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}
}

/// Immutable, fully resolved configuration for one test-suite run.
#[derive(Debug)]
pub struct TestConfig {
	paths: TestPaths,
	settings: Settings,
	read_notice: OnceFlag,
}

impl TestConfig {
	/// Discover the repository root above the running executable and load
	/// the merged configuration. Fails fast on any discovery, read, or
	/// parse problem.
	pub fn load() -> Result<TestConfig> {
		Self::from_paths(TestPaths::discover()?)
	}

	/// Like [`TestConfig::load`], walking up from an explicit start path.
	pub fn load_from(start_dir: &Path) -> Result<TestConfig> {
		Self::from_paths(TestPaths::from_start_dir(start_dir)?)
	}

	/// Load with a known repository root, skipping discovery. Used by tests
	/// that build a synthetic repository layout.
	pub fn load_from_root(code_root: &Path) -> Result<TestConfig> {
		Self::from_paths(TestPaths::from_root(code_root))
	}

	fn from_paths(paths: TestPaths) -> Result<TestConfig> {
		let settings = load_settings(&paths.base)?;
		Ok(TestConfig {
			paths,
			settings,
			read_notice: OnceFlag::new(),
		})
	}

	/// The resolved path triple.
	pub fn paths(&self) -> &TestPaths {
		&self.paths
	}

	/// The merged configuration view. The first read emits a one-time
	/// diagnostic so test logs show when configuration was first consumed.
	pub fn settings(&self) -> &Settings {
		if self.read_notice.fire() {
			tracing::info!(config = %self.paths.base.display(), "test configuration read");
		}
		&self.settings
	}

	/// Whether the configuration-read notice has been emitted yet.
	pub fn notice_fired(&self) -> bool {
		self.read_notice.fired()
	}

	/// Primary server connection string.
	pub fn connection_string(&self) -> Result<String> {
		Ok(self.settings().require("Data:ConnectionString")?.to_string())
	}

	/// User account configured with no password.
	pub fn passwordless_user(&self) -> Result<String> {
		Ok(self.settings().require("Data:PasswordlessUser")?.to_string())
	}

	/// Alternate no-password account name; empty by default.
	pub fn no_password_user(&self) -> Result<String> {
		Ok(self.settings().require("Data:NoPasswordUser")?.to_string())
	}

	/// Name of the secondary database used by cross-database tests.
	pub fn secondary_database(&self) -> Result<String> {
		Ok(self.settings().require("Data:SecondaryDatabase")?.to_string())
	}

	/// Feature flags advertised by the server under test.
	pub fn supported_features(&self) -> Result<ServerFeatures> {
		ServerFeatures::parse(self.settings().require("Data:SupportedFeatures")?)
	}

	/// True when the feature set includes JSON column support.
	pub fn supports_json(&self) -> Result<bool> {
		Ok(self.supported_features()?.contains(ServerFeatures::JSON))
	}

	/// True when the server caches stored-procedure metadata.
	pub fn supports_cached_procedures(&self) -> Result<bool> {
		self.settings().get_bool("Data:SupportsCachedProcedures")
	}

	/// Server-side CSV file for bulk-loader tests, placeholder-expanded.
	pub fn bulk_loader_csv_file(&self) -> Result<String> {
		self.expanded("Data:MySqlBulkLoaderCsvFile")
	}

	/// Client-local CSV file for bulk-loader tests, placeholder-expanded.
	pub fn bulk_loader_local_csv_file(&self) -> Result<String> {
		self.expanded("Data:MySqlBulkLoaderLocalCsvFile")
	}

	/// Server-side TSV file for bulk-loader tests, placeholder-expanded.
	pub fn bulk_loader_tsv_file(&self) -> Result<String> {
		self.expanded("Data:MySqlBulkLoaderTsvFile")
	}

	/// Client-local TSV file for bulk-loader tests, placeholder-expanded.
	pub fn bulk_loader_local_tsv_file(&self) -> Result<String> {
		self.expanded("Data:MySqlBulkLoaderLocalTsvFile")
	}

	/// Builder over the primary connection string.
	pub fn connection_string_builder(&self) -> Result<ConnectionStringBuilder> {
		ConnectionStringBuilder::parse(&self.connection_string()?)
	}

	/// Builder pre-populated for the sha256_password authentication
	/// account: fixed credentials, no default database.
	pub fn sha256_connection_string_builder(&self) -> Result<ConnectionStringBuilder> {
		let mut csb = self.connection_string_builder()?;
		csb.set_user_id(SHA256_USER);
		csb.set_password(SHA256_PASSWORD);
		csb.clear_database();
		Ok(csb)
	}

	/// Multiplier applied to test timeouts: tests run much slower in CI
	/// environments, so AppVeyor and Travis get a factor of 6.
	pub fn timeout_delay_factor() -> u32 {
		let is_ci = env_equals("APPVEYOR", "True") || env_equals("TRAVIS", "true");
		if is_ci { 6 } else { 1 }
	}

	fn expanded(&self, key: &str) -> Result<String> {
		Ok(self.paths.expand_variables(self.settings().require(key)?))
	}
}

/// Check an environment variable against an exact expected value.
fn env_equals(name: &str, expected: &str) -> bool {
	std::env::var(name).is_ok_and(|value| value == expected)
}
