use crate::config::types::{Settings, default_settings};
use crate::error::{HarnessError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// File name of the suite configuration document under the base test path.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Raw JSON configuration document, one top-level object.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct ConfigDocument(serde_json::Map<String, Value>);

/// Read and flatten a JSON configuration file into dotted keys.
///
/// Nested objects flatten with a `:` separator (`{"Data": {"SupportsJson":
/// true}}` becomes `Data:SupportsJson`), arrays flatten to indexed keys, and
/// scalar values render as their literal text. `null` values are treated as
/// absent so they never shadow a default.
pub fn load_config_file(path: &Path) -> Result<BTreeMap<String, String>> {
	if !path.exists() {
		return Err(HarnessError::ConfigNotFound {
			path: path.to_path_buf(),
		});
	}

	let content =
		std::fs::read_to_string(path).map_err(|source| HarnessError::ConfigReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, path)
}

/// Parse a configuration document from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<BTreeMap<String, String>> {
	let document: ConfigDocument =
		serde_json::from_str(content).map_err(|source| HarnessError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	let mut flat = BTreeMap::new();
	for (key, value) in document.0 {
		flatten_into(&key, &value, &mut flat);
	}
	Ok(flat)
}

/// Build the merged settings view for a base test directory: defaults
/// underneath, `<base_dir>/config.json` on top.
pub fn load_settings(base_dir: &Path) -> Result<Settings> {
	let overrides = load_config_file(&base_dir.join(CONFIG_FILE_NAME))?;
	Ok(Settings::layered(default_settings(), overrides))
}

fn flatten_into(key: &str, value: &Value, out: &mut BTreeMap<String, String>) {
	match value {
		Value::Null => {}
		Value::Object(map) => {
			for (child, child_value) in map {
				flatten_into(&format!("{key}:{child}"), child_value, out);
			}
		}
		Value::Array(items) => {
			for (index, item) in items.iter().enumerate() {
				flatten_into(&format!("{key}:{index}"), item, out);
			}
		}
		Value::String(s) => {
			out.insert(key.to_string(), s.clone());
		}
		Value::Bool(b) => {
			out.insert(key.to_string(), b.to_string());
		}
		Value::Number(n) => {
			out.insert(key.to_string(), n.to_string());
		}
	}
}
