//! Connection-string manipulation for tests that need to vary credentials.
//!
//! A MySQL connection string is an ordered list of `key=value` segments
//! joined by `;`. The builder preserves segment order and unknown keys so a
//! rewritten string stays as close to the configured one as possible.

use crate::error::{HarnessError, Result};
use std::fmt;

/// Accepted spellings for the user-name segment, canonical form first.
const USER_KEYS: &[&str] = &["User Id", "UserID", "Username", "Uid", "User"];

/// Accepted spellings for the password segment.
const PASSWORD_KEYS: &[&str] = &["Password", "pwd"];

/// Accepted spellings for the database segment.
const DATABASE_KEYS: &[&str] = &["Database", "Initial Catalog"];

/// Ordered, alias-aware `key=value` connection-string builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionStringBuilder {
	pairs: Vec<(String, String)>,
}

impl ConnectionStringBuilder {
	/// Parse a `key=value;key=value` connection string.
	///
	/// Empty segments (trailing `;`) are ignored; a non-empty segment
	/// without `=` is a syntax error. Keys and values are trimmed.
	pub fn parse(connection_string: &str) -> Result<ConnectionStringBuilder> {
		let mut pairs = Vec::new();

		for segment in connection_string.split(';') {
			let segment = segment.trim();
			if segment.is_empty() {
				continue;
			}

			let (key, value) = segment.split_once('=').ok_or_else(|| {
				HarnessError::ConnectionStringSyntax {
					segment: segment.to_string(),
				}
			})?;
			pairs.push((key.trim().to_string(), value.trim().to_string()));
		}

		Ok(ConnectionStringBuilder { pairs })
	}

	/// Look up a value by key, case-insensitively.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(key))
			.map(|(_, v)| v.as_str())
	}

	/// Set a key, replacing an existing segment in place or appending a new
	/// one. Key comparison is case-insensitive.
	pub fn set(&mut self, key: &str, value: &str) {
		match self
			.pairs
			.iter_mut()
			.find(|(k, _)| k.eq_ignore_ascii_case(key))
		{
			Some((_, v)) => *v = value.to_string(),
			None => self.pairs.push((key.to_string(), value.to_string())),
		}
	}

	/// Remove every segment whose key matches case-insensitively.
	pub fn remove(&mut self, key: &str) {
		self.pairs.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
	}

	/// Set the user name, reusing whichever alias spelling the string
	/// already carries.
	pub fn set_user_id(&mut self, user: &str) {
		self.set_aliased(USER_KEYS, user);
	}

	/// Set the password, reusing the existing alias spelling.
	pub fn set_password(&mut self, password: &str) {
		self.set_aliased(PASSWORD_KEYS, password);
	}

	/// Set the database, reusing the existing alias spelling.
	pub fn set_database(&mut self, database: &str) {
		self.set_aliased(DATABASE_KEYS, database);
	}

	/// Drop the database segment entirely, whatever it is spelled as.
	pub fn clear_database(&mut self) {
		for key in DATABASE_KEYS {
			self.remove(key);
		}
	}

	/// Render the connection string, segments joined with `;`.
	pub fn build(&self) -> String {
		self.to_string()
	}

	fn set_aliased(&mut self, aliases: &[&str], value: &str) {
		for key in aliases {
			if self.get(key).is_some() {
				self.set(key, value);
				return;
			}
		}
		self.set(aliases[0], value);
	}
}

impl fmt::Display for ConnectionStringBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for (key, value) in &self.pairs {
			if !first {
				f.write_str(";")?;
			}
			write!(f, "{key}={value}")?;
			first = false;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_and_rebuild_preserves_order() {
		let csb =
			ConnectionStringBuilder::parse("Server=localhost;User Id=root;Database=test").unwrap();
		assert_eq!(csb.build(), "Server=localhost;User Id=root;Database=test");
	}

	#[test]
	fn test_parse_ignores_empty_segments() {
		let csb = ConnectionStringBuilder::parse("Server=localhost;;Database=test;").unwrap();
		assert_eq!(csb.build(), "Server=localhost;Database=test");
	}

	#[test]
	fn test_parse_rejects_segment_without_equals() {
		let result = ConnectionStringBuilder::parse("Server=localhost;garbage");
		match result.unwrap_err() {
			HarnessError::ConnectionStringSyntax { segment } => assert_eq!(segment, "garbage"),
			other => panic!("Expected ConnectionStringSyntax, got {other:?}"),
		}
	}

	#[test]
	fn test_get_is_case_insensitive() {
		let csb = ConnectionStringBuilder::parse("Server=localhost").unwrap();
		assert_eq!(csb.get("server"), Some("localhost"));
		assert_eq!(csb.get("SERVER"), Some("localhost"));
	}

	#[test]
	fn test_set_replaces_in_place() {
		let mut csb =
			ConnectionStringBuilder::parse("Server=localhost;User Id=root;Database=test").unwrap();
		csb.set("user id", "other");
		assert_eq!(csb.build(), "Server=localhost;User Id=other;Database=test");
	}

	#[test]
	fn test_set_user_id_reuses_alias_spelling() {
		let mut csb = ConnectionStringBuilder::parse("Server=localhost;Uid=root").unwrap();
		csb.set_user_id("sha256user");
		assert_eq!(csb.build(), "Server=localhost;Uid=sha256user");
	}

	#[test]
	fn test_set_user_id_inserts_canonical_key() {
		let mut csb = ConnectionStringBuilder::parse("Server=localhost").unwrap();
		csb.set_user_id("root");
		assert_eq!(csb.build(), "Server=localhost;User Id=root");
	}

	#[test]
	fn test_clear_database_removes_any_alias() {
		let mut csb =
			ConnectionStringBuilder::parse("Server=localhost;Initial Catalog=test").unwrap();
		csb.clear_database();
		assert_eq!(csb.build(), "Server=localhost");
	}
}
