//! Collision types.
//!
//! # Role
//!
//! This module defines the vocabulary for export conflicts. Unlike a priority
//! registry, nothing here picks a winner: every collision is fatal to the call
//! that observed it.

use std::fmt;

use enclave_module::Symbol;

/// Two owners observed for the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("symbol export conflicted, {symbol} is {kind}")]
pub struct Collision {
	/// The symbol both parties claimed.
	pub symbol: Symbol,
	pub kind: CollisionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionKind {
	/// An explicit export for `symbol` already names a different module.
	ExplicitBinding { existing: String, incoming: String },

	/// The cache already holds a different handle for `symbol`.
	///
	/// Both fields are handle provenances, not module names.
	CachePublish { existing: String, incoming: String },

	/// More than one candidate of a package export produced `symbol`.
	PackageProbe {
		package: Symbol,
		/// Every candidate that produced the symbol, in registration order.
		modules: Vec<String>,
	},
}

impl fmt::Display for CollisionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ExplicitBinding { existing, incoming } => {
				write!(f, "exported by module {existing} and {incoming}")
			}
			Self::CachePublish { existing, incoming } => {
				write!(f, "resolved by {existing} and {incoming}")
			}
			Self::PackageProbe { package, modules } => {
				write!(
					f,
					"exported by modules {} through package {package}",
					modules.join(", ")
				)
			}
		}
	}
}

impl Collision {
	pub(crate) fn explicit_binding(symbol: Symbol, existing: &str, incoming: &str) -> Self {
		Self {
			symbol,
			kind: CollisionKind::ExplicitBinding {
				existing: existing.to_owned(),
				incoming: incoming.to_owned(),
			},
		}
		.logged()
	}

	pub(crate) fn cache_publish(symbol: Symbol, existing: String, incoming: String) -> Self {
		Self {
			symbol,
			kind: CollisionKind::CachePublish { existing, incoming },
		}
		.logged()
	}

	pub(crate) fn package_probe(symbol: Symbol, package: Symbol, modules: Vec<String>) -> Self {
		Self {
			symbol,
			kind: CollisionKind::PackageProbe { package, modules },
		}
		.logged()
	}

	fn logged(self) -> Self {
		tracing::warn!(symbol = %self.symbol, kind = %self.kind, "symbol export conflict");
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_names_both_parties() {
		let c = Collision::explicit_binding(Symbol::new("a.B"), "left", "right");
		assert_eq!(
			c.to_string(),
			"symbol export conflicted, a.B is exported by module left and right"
		);

		let c = Collision::package_probe(
			Symbol::new("p.X"),
			Symbol::new("p"),
			vec!["left".into(), "right".into()],
		);
		assert_eq!(
			c.to_string(),
			"symbol export conflicted, p.X is exported by modules left, right through package p"
		);
	}
}
