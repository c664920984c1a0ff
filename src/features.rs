//! Optional server capabilities advertised to the test suite.
//!
//! Feature flags arrive as a single configured string such as
//! `"Json,LargePackets"`. Parsing goes through a fixed name table rather
//! than any reflective enum machinery, so an unrecognized name is an
//! explicit error instead of a silent zero.

use crate::error::{HarnessError, Result};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit set of optional server capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerFeatures(u32);

/// Name table for parsing and display. Order here is display order.
const FEATURE_NAMES: &[(&str, u32)] = &[
	("Json", 1 << 0),
	("CachedProcedures", 1 << 1),
	("LargePackets", 1 << 2),
	("Sha256Password", 1 << 3),
];

impl ServerFeatures {
	/// The empty set, spelled `"None"` in configuration.
	pub const NONE: ServerFeatures = ServerFeatures(0);

	/// Server supports the JSON column type.
	pub const JSON: ServerFeatures = ServerFeatures(1 << 0);

	/// Server caches stored-procedure metadata.
	pub const CACHED_PROCEDURES: ServerFeatures = ServerFeatures(1 << 1);

	/// Server accepts packets larger than the default max_allowed_packet.
	pub const LARGE_PACKETS: ServerFeatures = ServerFeatures(1 << 2);

	/// Server has the sha256_password authentication plugin enabled.
	pub const SHA256_PASSWORD: ServerFeatures = ServerFeatures(1 << 3);

	/// Parse a comma- or pipe-joined list of feature names into the union
	/// of the named flags.
	///
	/// Names are matched exactly against the fixed table; `"None"` and the
	/// empty string yield the empty set. Whitespace around separators is
	/// ignored. An unrecognized name fails with `UnknownFeature`.
	pub fn parse(value: &str) -> Result<ServerFeatures> {
		let mut features = ServerFeatures::NONE;

		for name in value.split([',', '|']) {
			let name = name.trim();
			if name.is_empty() || name == "None" {
				continue;
			}

			let bit = FEATURE_NAMES
				.iter()
				.find(|(known, _)| *known == name)
				.map(|(_, bit)| *bit)
				.ok_or_else(|| HarnessError::UnknownFeature {
					name: name.to_string(),
				})?;
			features.0 |= bit;
		}

		Ok(features)
	}

	/// True if every flag in `other` is present in `self`.
	pub fn contains(self, other: ServerFeatures) -> bool {
		self.0 & other.0 == other.0
	}

	/// True if no flags are set.
	pub fn is_empty(self) -> bool {
		self.0 == 0
	}
}

impl BitOr for ServerFeatures {
	type Output = ServerFeatures;

	fn bitor(self, rhs: ServerFeatures) -> ServerFeatures {
		ServerFeatures(self.0 | rhs.0)
	}
}

impl BitOrAssign for ServerFeatures {
	fn bitor_assign(&mut self, rhs: ServerFeatures) {
		self.0 |= rhs.0;
	}
}

impl fmt::Display for ServerFeatures {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_empty() {
			return f.write_str("None");
		}

		let mut first = true;
		for (name, bit) in FEATURE_NAMES {
			if self.0 & bit != 0 {
				if !first {
					f.write_str(",")?;
				}
				f.write_str(name)?;
				first = false;
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_single_name() {
		let features = ServerFeatures::parse("Json").unwrap();
		assert!(features.contains(ServerFeatures::JSON));
		assert!(!features.contains(ServerFeatures::LARGE_PACKETS));
	}

	#[test]
	fn test_parse_comma_joined_union() {
		let features = ServerFeatures::parse("Json,LargePackets").unwrap();
		assert!(features.contains(ServerFeatures::JSON));
		assert!(features.contains(ServerFeatures::LARGE_PACKETS));
		assert!(!features.contains(ServerFeatures::CACHED_PROCEDURES));
	}

	#[test]
	fn test_parse_pipe_joined_union() {
		let features = ServerFeatures::parse("CachedProcedures|Sha256Password").unwrap();
		assert!(features.contains(ServerFeatures::CACHED_PROCEDURES));
		assert!(features.contains(ServerFeatures::SHA256_PASSWORD));
	}

	#[test]
	fn test_parse_tolerates_whitespace() {
		let features = ServerFeatures::parse("Json , LargePackets").unwrap();
		assert!(features.contains(ServerFeatures::JSON | ServerFeatures::LARGE_PACKETS));
	}

	#[test]
	fn test_parse_none_is_empty() {
		assert!(ServerFeatures::parse("None").unwrap().is_empty());
		assert!(ServerFeatures::parse("").unwrap().is_empty());
	}

	#[test]
	fn test_parse_unknown_name_fails() {
		let result = ServerFeatures::parse("Json,Holographic");
		match result.unwrap_err() {
			HarnessError::UnknownFeature { name } => assert_eq!(name, "Holographic"),
			other => panic!("Expected UnknownFeature, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_is_case_sensitive() {
		assert!(ServerFeatures::parse("json").is_err());
	}

	#[test]
	fn test_membership_without_flag() {
		let features = ServerFeatures::parse("LargePackets").unwrap();
		assert!(!features.contains(ServerFeatures::JSON));
	}

	#[test]
	fn test_display_round_trips_names() {
		let features = ServerFeatures::JSON | ServerFeatures::SHA256_PASSWORD;
		assert_eq!(features.to_string(), "Json,Sha256Password");
		assert_eq!(ServerFeatures::NONE.to_string(), "None");
	}
}
