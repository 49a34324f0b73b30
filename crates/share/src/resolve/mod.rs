//! Symbol resolution.
//!
//! The [`Resolver`] answers "which module owns this symbol" by checking three
//! tiers in order:
//!
//! 1. The resolution cache.
//! 2. The explicit export binding for the symbol, if any.
//! 3. The package exports of the symbol's ancestry, most specific prefix first.
//!
//! Explicit bindings name a single intended owner, so they short-circuit the
//! package walk. A package export only names candidates: at the first prefix
//! with candidates every one of them is probed, and a second hit is a
//! [`Collision`] rather than a tie-break.
//!
//! A module failing to resolve a symbol is a miss, never an error. Only
//! collisions escape.

use enclave_module::{ModuleRef, Symbol, SymbolHandle};

use crate::cache::ResolutionCache;
use crate::exports::ExportRegistry;
use crate::{Collision, Result};


/// Which tier produced a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVia {
	/// Already cached by an earlier resolution.
	Cache,
	/// Resolved by the module named in an explicit export.
	Explicit { module: String },
	/// Resolved by the only candidate of a package export that had the symbol.
	Package { package: Symbol, module: String },
}

/// A successful resolution and the tier it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<H> {
	pub handle: H,
	pub via: ResolvedVia,
}

/// Stateless view over the export tables and the cache.
pub(crate) struct Resolver<'a, H: SymbolHandle> {
	exports: &'a ExportRegistry<H>,
	cache: &'a ResolutionCache<H>,
}

impl<'a, H: SymbolHandle> Resolver<'a, H> {
	pub(crate) fn new(exports: &'a ExportRegistry<H>, cache: &'a ResolutionCache<H>) -> Self {
		Self { exports, cache }
	}

	/// Resolves `symbol` through the cache, explicit and package tiers.
	///
	/// Returns `Ok(None)` when no tier can supply the symbol.
	pub(crate) fn resolve(&self, symbol: &str) -> Result<Option<Resolved<H>>> {
		if symbol.is_empty() {
			return Ok(None);
		}
		if let Some(handle) = self.cache.get(symbol) {
			return Ok(Some(Resolved {
				handle,
				via: ResolvedVia::Cache,
			}));
		}

		let symbol = Symbol::new(symbol);
		if let Some(module) = self.exports.explicit_owner(symbol.as_str())
			&& let Some(handle) = self.resolve_explicit(&symbol, &module)?
		{
			return Ok(Some(Resolved {
				handle,
				via: ResolvedVia::Explicit {
					module: module.name().to_owned(),
				},
			}));
		}

		self.resolve_package(&symbol)
	}

	/// Asks the explicit owner for `symbol` and publishes a hit.
	pub(crate) fn resolve_explicit(&self, symbol: &Symbol, module: &ModuleRef<H>) -> Result<Option<H>> {
		match probe(module, symbol) {
			Some(handle) => Ok(Some(self.cache.publish(symbol, handle)?)),
			None => Ok(None),
		}
	}

	fn resolve_package(&self, symbol: &Symbol) -> Result<Option<Resolved<H>>> {
		for package in symbol.packages() {
			let candidates = self.exports.candidates(package);
			if candidates.is_empty() {
				continue;
			}

			let mut hits: Vec<(&ModuleRef<H>, H)> = Vec::new();
			for module in &candidates {
				if let Some(handle) = probe(module, symbol) {
					hits.push((module, handle));
				}
			}

			if hits.len() > 1 {
				let modules = hits.iter().map(|(m, _)| m.name().to_owned()).collect();
				return Err(
					Collision::package_probe(symbol.clone(), Symbol::new(package), modules).into(),
				);
			}
			let Some((module, handle)) = hits.pop() else {
				continue;
			};

			tracing::info!(
				%symbol,
				package,
				module = module.name(),
				"sharing symbol exported through package"
			);
			let handle = self.cache.publish(symbol, handle)?;
			return Ok(Some(Resolved {
				handle,
				via: ResolvedVia::Package {
					package: Symbol::new(package),
					module: module.name().to_owned(),
				},
			}));
		}
		Ok(None)
	}
}

/// Asks one module for `symbol`, folding its failure channel into a miss.
pub(crate) fn probe<H: SymbolHandle>(module: &ModuleRef<H>, symbol: &Symbol) -> Option<H> {
	match module.resolve_symbol(symbol) {
		Ok(found) => found,
		Err(error) => {
			tracing::debug!(
				module = module.name(),
				%symbol,
				%error,
				"module lookup failed; treating as not present"
			);
			None
		}
	}
}
