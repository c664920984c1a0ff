//! Repository-root discovery and derived test-suite paths.
//!
//! The test suite runs from deep inside the build output tree, so the
//! repository root is found by walking up from the running executable until
//! a directory named after the project appears. All other paths the suite
//! needs are fixed subdirectories of that root.

use crate::error::{HarnessError, Result};
use std::path::{Path, PathBuf};

/// Directory name of the repository root, matched case-insensitively.
pub const PROJECT_DIR_NAME: &str = "MySqlConnector";

/// Placeholder token replaced by the resolved test-data path.
pub const TEST_DATA_TOKEN: &str = "%TESTDATA%";

/// Walk upward from `start`, returning the first ancestor (including `start`
/// itself) whose file name equals `project_name`, compared case-insensitively.
///
/// Fails with `RootNotFound` if the filesystem root is reached without a
/// match. There is no fallback: tests cannot run outside the repository.
pub fn find_code_root(start: &Path, project_name: &str) -> Result<PathBuf> {
	let mut current = start;

	loop {
		if let Some(name) = current.file_name()
			&& name.to_string_lossy().eq_ignore_ascii_case(project_name)
		{
			return Ok(current.to_path_buf());
		}

		match current.parent() {
			Some(parent) => current = parent,
			None => {
				return Err(HarnessError::RootNotFound {
					start: start.to_path_buf(),
					project: project_name.to_string(),
				});
			}
		}
	}
}

/// The three fixed directories the test suite reads from, all derived from
/// the discovered repository root. Computed once, constant thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPaths {
	/// Repository root (the directory named after the project).
	pub code_root: PathBuf,

	/// Base test directory containing `config.json`.
	pub base: PathBuf,

	/// Server TLS certificates used by secure-connection tests.
	pub certs: PathBuf,

	/// Data files referenced via the `%TESTDATA%` placeholder.
	pub test_data: PathBuf,
}

impl TestPaths {
	/// Derive the path triple from an already-known repository root.
	pub fn from_root(code_root: &Path) -> Self {
		Self {
			code_root: code_root.to_path_buf(),
			base: code_root.join("tests").join("SideBySide"),
			certs: code_root.join(".ci").join("server").join("certs"),
			test_data: code_root.join("tests").join("TestData"),
		}
	}

	/// Discover the repository root above `start_dir` and derive the triple.
	pub fn from_start_dir(start_dir: &Path) -> Result<Self> {
		let root = find_code_root(start_dir, PROJECT_DIR_NAME)?;
		Ok(Self::from_root(&root))
	}

	/// Discover the repository root above the running executable.
	pub fn discover() -> Result<Self> {
		let exe = std::env::current_exe()
			.map_err(|source| HarnessError::ExeLocation { source })?;
		Self::from_start_dir(&exe)
	}

	/// Replace every `%TESTDATA%` occurrence with the resolved test-data
	/// path. Values without the token come back unchanged. Pure.
	pub fn expand_variables(&self, value: &str) -> String {
		value.replace(TEST_DATA_TOKEN, &self.test_data.to_string_lossy())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_find_code_root_exact_name() {
		let start = Path::new("/home/ci/MySqlConnector/tests/SideBySide/bin/debug");
		let root = find_code_root(start, "MySqlConnector").unwrap();
		assert_eq!(root, Path::new("/home/ci/MySqlConnector"));
	}

	#[test]
	fn test_find_code_root_case_insensitive() {
		let start = Path::new("/srv/mysqlconnector/tests/SideBySide");
		let root = find_code_root(start, "MySqlConnector").unwrap();
		assert_eq!(root, Path::new("/srv/mysqlconnector"));
	}

	#[test]
	fn test_find_code_root_start_is_root() {
		let start = Path::new("/work/MySqlConnector");
		let root = find_code_root(start, "MySqlConnector").unwrap();
		assert_eq!(root, start);
	}

	#[test]
	fn test_find_code_root_not_found() {
		let start = Path::new("/tmp/somewhere/else");
		let result = find_code_root(start, "MySqlConnector");
		match result.unwrap_err() {
			HarnessError::RootNotFound { start: s, project } => {
				assert_eq!(s, start);
				assert_eq!(project, "MySqlConnector");
			}
			other => panic!("Expected RootNotFound, got {other:?}"),
		}
	}

	#[test]
	fn test_path_triple_layout() {
		let paths = TestPaths::from_root(Path::new("/repo/MySqlConnector"));
		assert_eq!(
			paths.base,
			Path::new("/repo/MySqlConnector/tests/SideBySide")
		);
		assert_eq!(
			paths.certs,
			Path::new("/repo/MySqlConnector/.ci/server/certs")
		);
		assert_eq!(
			paths.test_data,
			Path::new("/repo/MySqlConnector/tests/TestData")
		);
	}

	#[test]
	fn test_expand_variables_no_token() {
		let paths = TestPaths::from_root(Path::new("/repo/MySqlConnector"));
		assert_eq!(paths.expand_variables("no token"), "no token");
		assert_eq!(paths.expand_variables(""), "");
	}

	#[test]
	fn test_expand_variables_substitutes_token() {
		let paths = TestPaths::from_root(Path::new("/repo/MySqlConnector"));
		assert_eq!(
			paths.expand_variables("%TESTDATA%/x.csv"),
			"/repo/MySqlConnector/tests/TestData/x.csv"
		);
	}

	#[test]
	fn test_expand_variables_every_occurrence() {
		let paths = TestPaths::from_root(Path::new("/r/MySqlConnector"));
		let expanded = paths.expand_variables("%TESTDATA%/a;%TESTDATA%/b");
		assert_eq!(
			expanded,
			"/r/MySqlConnector/tests/TestData/a;/r/MySqlConnector/tests/TestData/b"
		);
	}
}
