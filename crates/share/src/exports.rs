//! Export registry.
//!
//! # Role
//!
//! Holds the two export tiers: explicit symbol bindings (one owner per symbol)
//! and package exports (a set of candidate owners per package prefix). Both
//! only ever grow.
//!
//! # Invariants
//!
//! - An explicit binding never changes owner. Rebinding to the same module is a
//!   no-op; rebinding to another module is a [`Collision`].
//! - Candidate sets keep registration order, so package probes and their
//!   conflict reports are reproducible.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use enclave_module::{ModuleRef, Symbol, SymbolHandle};
use indexmap::IndexSet;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::Collision;

/// Candidate owners of one package prefix.
struct CandidateSet<H: SymbolHandle> {
	modules: RwLock<IndexSet<ModuleRef<H>, FxBuildHasher>>,
}

impl<H: SymbolHandle> Default for CandidateSet<H> {
	fn default() -> Self {
		Self {
			modules: RwLock::new(IndexSet::default()),
		}
	}
}

impl<H: SymbolHandle> CandidateSet<H> {
	fn insert(&self, module: &ModuleRef<H>) -> bool {
		self.modules.write().insert(module.clone())
	}

	fn to_vec(&self) -> Vec<ModuleRef<H>> {
		self.modules.read().iter().cloned().collect()
	}
}

pub(crate) struct ExportRegistry<H: SymbolHandle> {
	explicit: DashMap<Symbol, ModuleRef<H>, FxBuildHasher>,
	packages: DashMap<Symbol, Arc<CandidateSet<H>>, FxBuildHasher>,
}

impl<H: SymbolHandle> Default for ExportRegistry<H> {
	fn default() -> Self {
		Self {
			explicit: DashMap::with_hasher(FxBuildHasher),
			packages: DashMap::with_hasher(FxBuildHasher),
		}
	}
}

impl<H: SymbolHandle> ExportRegistry<H> {
	/// Binds `symbol` to `module`. Blank symbols are ignored.
	pub(crate) fn add_explicit(&self, symbol: &str, module: &ModuleRef<H>) -> Result<(), Collision> {
		let symbol = Symbol::new(symbol);
		if symbol.is_blank() {
			return Ok(());
		}
		match self.explicit.entry(symbol) {
			Entry::Vacant(slot) => {
				slot.insert(module.clone());
				Ok(())
			}
			Entry::Occupied(slot) if slot.get() == module => Ok(()),
			Entry::Occupied(slot) => Err(Collision::explicit_binding(
				slot.key().clone(),
				slot.get().name(),
				module.name(),
			)),
		}
	}

	/// Adds `module` as a candidate owner of `package`. Blank prefixes are ignored.
	pub(crate) fn add_package(&self, package: &str, module: &ModuleRef<H>) {
		let package = Symbol::new(package);
		if package.is_blank() {
			return;
		}
		// Clone the set out so the shard lock is not held across the insert.
		let set = Arc::clone(&*self.packages.entry(package.clone()).or_default());
		if set.insert(module) {
			tracing::trace!(%package, module = module.name(), "package export added");
		}
	}

	pub(crate) fn explicit_owner(&self, symbol: &str) -> Option<ModuleRef<H>> {
		self.explicit.get(symbol).map(|owner| owner.value().clone())
	}

	pub(crate) fn contains_explicit(&self, symbol: &str) -> bool {
		self.explicit.contains_key(symbol)
	}

	pub(crate) fn explicit_len(&self) -> usize {
		self.explicit.len()
	}

	/// Returns every explicit binding, ordered by symbol.
	pub(crate) fn explicit_bindings(&self) -> Vec<(Symbol, ModuleRef<H>)> {
		let mut bindings: Vec<_> = self
			.explicit
			.iter()
			.map(|entry| (entry.key().clone(), entry.value().clone()))
			.collect();
		bindings.sort_unstable_by(|a, b| a.0.cmp(&b.0));
		bindings
	}

	/// Returns the candidates for `package` in registration order.
	pub(crate) fn candidates(&self, package: &str) -> Vec<ModuleRef<H>> {
		let Some(set) = self.packages.get(package).map(|set| Arc::clone(set.value())) else {
			return Vec::new();
		};
		set.to_vec()
	}

	pub(crate) fn package_len(&self) -> usize {
		self.packages.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::CollisionKind;
	use crate::test_fixtures::StubModule;

	/// Registering the same pair twice leaves exactly one binding.
	#[test]
	fn test_explicit_export_idempotent() {
		let registry = ExportRegistry::default();
		let (a, _) = StubModule::new("a").build();

		registry.add_explicit("p.X", &a).unwrap();
		registry.add_explicit("p.X", &a).unwrap();

		assert_eq!(registry.explicit_len(), 1);
		assert_eq!(registry.explicit_owner("p.X"), Some(a));
	}

	#[test]
	fn test_explicit_export_conflict() {
		let registry = ExportRegistry::default();
		let (a, _) = StubModule::new("a").build();
		let (b, _) = StubModule::new("b").build();

		registry.add_explicit("p.X", &a).unwrap();
		let err = registry.add_explicit("p.X", &b).unwrap_err();

		assert_eq!(err.symbol, "p.X");
		assert_eq!(
			err.kind,
			CollisionKind::ExplicitBinding {
				existing: "a".into(),
				incoming: "b".into(),
			}
		);
		assert_eq!(registry.explicit_owner("p.X"), Some(a), "first binding must survive");
	}

	/// Distinct module instances conflict even when they share a name.
	#[test]
	fn test_explicit_conflict_is_by_identity() {
		let registry = ExportRegistry::default();
		let (a1, _) = StubModule::new("a").build();
		let (a2, _) = StubModule::new("a").build();

		registry.add_explicit("p.X", &a1).unwrap();
		assert!(registry.add_explicit("p.X", &a2).is_err());
	}

	#[test]
	fn test_blank_symbol_ignored() {
		let registry = ExportRegistry::default();
		let (a, _) = StubModule::new("a").build();

		registry.add_explicit("", &a).unwrap();
		registry.add_explicit(" \t", &a).unwrap();
		registry.add_package("", &a);
		registry.add_package("   ", &a);

		assert_eq!(registry.explicit_len(), 0);
		assert_eq!(registry.package_len(), 0);
	}

	#[test]
	fn test_package_candidates_are_a_set_in_order() {
		let registry = ExportRegistry::default();
		let (a, _) = StubModule::new("a").build();
		let (b, _) = StubModule::new("b").build();

		registry.add_package("p", &b);
		registry.add_package("p", &a);
		registry.add_package("p", &b);

		let names: Vec<_> = registry
			.candidates("p")
			.iter()
			.map(|m| m.name().to_owned())
			.collect();
		assert_eq!(names, ["b", "a"]);
		assert_eq!(registry.package_len(), 1);
		assert!(registry.candidates("q").is_empty());
	}

	#[test]
	fn test_explicit_bindings_sorted() {
		let registry = ExportRegistry::default();
		let (a, _) = StubModule::new("a").build();

		for symbol in ["p.Z", "p.A", "o.M"] {
			registry.add_explicit(symbol, &a).unwrap();
		}

		let symbols: Vec<_> = registry
			.explicit_bindings()
			.into_iter()
			.map(|(symbol, _)| symbol)
			.collect();
		assert_eq!(symbols, ["o.M", "p.A", "p.Z"]);
	}
}
