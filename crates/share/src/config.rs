//! Service configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tunables for a [`crate::ShareService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShareConfig {
	/// Marks a nested type name, e.g. `a.Outer$Inner`.
	///
	/// Preload tolerates missing explicit exports whose name contains it.
	pub nested_separator: char,
	/// Whether preload fails on a missing top-level explicit export.
	///
	/// When false the miss is only logged.
	pub fail_on_missing_export: bool,
}

impl Default for ShareConfig {
	fn default() -> Self {
		Self {
			nested_separator: '$',
			fail_on_missing_export: true,
		}
	}
}

impl ShareConfig {
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}

	/// Reads and parses a TOML config file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&src)
	}
}
