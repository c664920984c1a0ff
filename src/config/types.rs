use crate::error::{HarnessError, Result};
use std::collections::BTreeMap;

/// Immutable merged view over dotted configuration keys.
///
/// Built once from the default layer overlaid by the `config.json` document;
/// never mutated afterwards, so it can be shared freely across concurrent
/// tests without locking.
#[derive(Debug, Clone, Default)]
pub struct Settings {
	values: BTreeMap<String, String>,
}

/// In-memory bottom layer of the configuration cascade. The JSON file
/// overrides or extends these.
pub fn default_settings() -> BTreeMap<String, String> {
	BTreeMap::from([
		("Data:NoPasswordUser".to_string(), String::new()),
		(
			"Data:SupportsCachedProcedures".to_string(),
			"false".to_string(),
		),
		("Data:SupportsJson".to_string(), "false".to_string()),
	])
}

impl Settings {
	/// Layer `overrides` on top of `defaults`; an override wins for any key
	/// present in both.
	pub fn layered(
		defaults: BTreeMap<String, String>,
		overrides: BTreeMap<String, String>,
	) -> Settings {
		let mut values = defaults;
		values.extend(overrides);
		Settings { values }
	}

	/// Look up a dotted key, `None` if absent.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.values.get(key).map(String::as_str)
	}

	/// Look up a dotted key that must be present.
	pub fn require(&self, key: &str) -> Result<&str> {
		self.get(key).ok_or_else(|| HarnessError::MissingKey {
			key: key.to_string(),
		})
	}

	/// Look up a required key and interpret it as a boolean literal
	/// (`true`/`false`, case-insensitive).
	pub fn get_bool(&self, key: &str) -> Result<bool> {
		let value = self.require(key)?;
		match value.to_ascii_lowercase().as_str() {
			"true" => Ok(true),
			"false" => Ok(false),
			_ => Err(HarnessError::InvalidBool {
				key: key.to_string(),
				value: value.to_string(),
			}),
		}
	}

	/// Number of keys in the merged view.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// True if the merged view holds no keys.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}
