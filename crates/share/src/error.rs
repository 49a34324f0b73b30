use std::path::PathBuf;

use enclave_module::Symbol;

use crate::Collision;

/// Errors surfaced by [`crate::ShareService`].
///
/// A symbol that simply is not shared is never an error; see
/// [`crate::ShareService::resolve`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum ShareError {
	/// Two modules claimed the same symbol.
	#[error(transparent)]
	Conflict(#[from] Collision),

	/// A module declared an explicit export it cannot produce.
	#[error("could not load {symbol} which is exported by module {module}")]
	MissingExport { symbol: Symbol, module: String },
}

impl ShareError {
	/// Returns the collision if this is a conflict.
	pub fn as_collision(&self) -> Option<&Collision> {
		match self {
			Self::Conflict(c) => Some(c),
			Self::MissingExport { .. } => None,
		}
	}
}

pub type Result<T, E = ShareError> = std::result::Result<T, E>;

/// Errors loading a [`crate::ShareConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid share config: {0}")]
	Parse(#[from] toml::de::Error),
}
