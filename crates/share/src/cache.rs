//! Resolution cache and its snapshots.
//!
//! # Invariants
//!
//! - A cache entry never changes once written. Publishing an equal handle is a
//!   no-op; publishing a different one is a [`Collision`]. The check and the
//!   insert happen under one shard lock, so two racing publishers with unequal
//!   handles can never both succeed.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use enclave_module::{Symbol, SymbolHandle};
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::Collision;

pub(crate) struct ResolutionCache<H: SymbolHandle> {
	entries: DashMap<Symbol, H, FxBuildHasher>,
}

impl<H: SymbolHandle> Default for ResolutionCache<H> {
	fn default() -> Self {
		Self {
			entries: DashMap::with_hasher(FxBuildHasher),
		}
	}
}

impl<H: SymbolHandle> ResolutionCache<H> {
	#[inline]
	pub(crate) fn get(&self, symbol: &str) -> Option<H> {
		self.entries.get(symbol).map(|handle| handle.value().clone())
	}

	pub(crate) fn contains(&self, symbol: &str) -> bool {
		self.entries.contains_key(symbol)
	}

	/// Publishes `handle` for `symbol`, keeping the first writer's handle.
	///
	/// Returns the cached handle, which equals `handle` on success.
	pub(crate) fn publish(&self, symbol: &Symbol, handle: H) -> Result<H, Collision> {
		match self.entries.entry(symbol.clone()) {
			Entry::Vacant(slot) => {
				slot.insert(handle.clone());
				tracing::debug!(%symbol, provenance = %handle.provenance(), "cached shared symbol");
				Ok(handle)
			}
			Entry::Occupied(slot) if *slot.get() == handle => Ok(slot.get().clone()),
			Entry::Occupied(slot) => Err(Collision::cache_publish(
				symbol.clone(),
				slot.get().provenance(),
				handle.provenance(),
			)),
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}

	/// Copies the current entries into an immutable [`SharedSymbolMap`].
	pub(crate) fn snapshot(&self) -> SharedSymbolMap<H> {
		let entries: FxHashMap<Symbol, H> = self
			.entries
			.iter()
			.map(|entry| (entry.key().clone(), entry.value().clone()))
			.collect();
		SharedSymbolMap {
			entries: Arc::new(entries),
		}
	}
}

/// Immutable point-in-time copy of the resolution cache.
///
/// Later resolutions never show up in an existing snapshot, and nothing done
/// through a snapshot reaches the live cache.
#[derive(Debug)]
pub struct SharedSymbolMap<H> {
	entries: Arc<FxHashMap<Symbol, H>>,
}

impl<H> Clone for SharedSymbolMap<H> {
	fn clone(&self) -> Self {
		Self {
			entries: Arc::clone(&self.entries),
		}
	}
}

impl<H> SharedSymbolMap<H> {
	#[inline]
	pub fn get(&self, symbol: &str) -> Option<&H> {
		self.entries.get(symbol)
	}

	pub fn contains(&self, symbol: &str) -> bool {
		self.entries.contains_key(symbol)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &H)> {
		self.entries.iter()
	}

	/// Returns the symbols in this snapshot, sorted.
	pub fn symbols(&self) -> Vec<Symbol> {
		let mut symbols: Vec<_> = self.entries.keys().cloned().collect();
		symbols.sort_unstable();
		symbols
	}
}
