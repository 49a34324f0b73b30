//! The shared symbol service.

use enclave_module::{ModuleRef, Symbol, SymbolHandle};

use crate::cache::{ResolutionCache, SharedSymbolMap};
use crate::exports::ExportRegistry;
use crate::preload::{PreloadLatch, preload_exports};
use crate::resolve::{Resolved, Resolver};
use crate::{Result, ShareConfig};


/// Single arbiter of which module owns a shared symbol.
///
/// One service is constructed per container and handed by reference to
/// everything that registers or resolves symbols. All methods take `&self` and
/// are safe to call from any number of threads.
pub struct ShareService<H: SymbolHandle> {
	config: ShareConfig,
	exports: ExportRegistry<H>,
	cache: ResolutionCache<H>,
	preloaded: PreloadLatch,
}

impl<H: SymbolHandle> Default for ShareService<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H: SymbolHandle> ShareService<H> {
	pub fn new() -> Self {
		Self::with_config(ShareConfig::default())
	}

	pub fn with_config(config: ShareConfig) -> Self {
		Self {
			config,
			exports: ExportRegistry::default(),
			cache: ResolutionCache::default(),
			preloaded: PreloadLatch::default(),
		}
	}

	pub fn config(&self) -> &ShareConfig {
		&self.config
	}

	/// Declares that `module` owns `symbol`.
	///
	/// Blank symbols are ignored. Re-declaring the same owner is a no-op.
	///
	/// # Errors
	///
	/// [`crate::ShareError::Conflict`] if `symbol` is already owned by another module.
	pub fn add_explicit_export(&self, symbol: &str, module: &ModuleRef<H>) -> Result<()> {
		Ok(self.exports.add_explicit(symbol, module)?)
	}

	/// Declares `module` a candidate owner of every symbol under `package`.
	///
	/// Blank prefixes are ignored. Any number of modules may share a prefix.
	pub fn add_package_export(&self, package: &str, module: &ModuleRef<H>) {
		self.exports.add_package(package, module);
	}

	/// Shares an already loaded handle for `symbol`.
	///
	/// The handle goes straight into the resolution cache. No explicit binding
	/// is created, so [`Self::contains_symbol`] is unaffected.
	///
	/// # Errors
	///
	/// [`crate::ShareError::Conflict`] if a different handle is already cached.
	pub fn add_resolved_export(&self, symbol: &str, handle: H) -> Result<()> {
		let symbol = Symbol::new(symbol);
		if symbol.is_blank() {
			return Ok(());
		}
		self.cache.publish(&symbol, handle)?;
		Ok(())
	}

	/// Returns true if `symbol` has an explicit export. Does not resolve.
	pub fn contains_symbol(&self, symbol: &str) -> bool {
		self.exports.contains_explicit(symbol)
	}

	/// Number of explicit exports.
	pub fn exported_symbol_count(&self) -> usize {
		self.exports.explicit_len()
	}

	/// Resolves `symbol` to its single owner's handle.
	///
	/// Returns `Ok(None)` if the symbol is not shared. Module lookup failures
	/// count as "not shared".
	///
	/// # Errors
	///
	/// [`crate::ShareError::Conflict`] if two modules supply the symbol.
	pub fn resolve(&self, symbol: &str) -> Result<Option<H>> {
		Ok(self.resolve_traced(symbol)?.map(|resolved| resolved.handle))
	}

	/// Like [`Self::resolve`], also reporting which tier produced the handle.
	pub fn resolve_traced(&self, symbol: &str) -> Result<Option<Resolved<H>>> {
		Resolver::new(&self.exports, &self.cache).resolve(symbol)
	}

	/// Eagerly resolves every explicit export, once per service.
	///
	/// Calls after the first return `Ok(())` without doing any work, even if
	/// the first call failed or is still running.
	///
	/// # Errors
	///
	/// - [`crate::ShareError::MissingExport`] if a module cannot produce a
	///   top-level symbol it explicitly exports. Nested names are tolerated.
	/// - [`crate::ShareError::Conflict`] if a resolved handle disagrees with a
	///   cached one.
	pub fn preload_all(&self) -> Result<()> {
		if !self.preloaded.try_acquire() {
			return Ok(());
		}
		let stats = preload_exports(&self.exports, &self.cache, &self.config)?;
		tracing::info!(
			resolved = stats.resolved,
			tolerated_misses = stats.tolerated_misses,
			"preloaded shared symbols"
		);
		Ok(())
	}

	pub fn is_preloaded(&self) -> bool {
		self.preloaded.is_set()
	}

	/// Preloads, then returns an immutable snapshot of every resolved symbol.
	pub fn shared_symbol_map(&self) -> Result<SharedSymbolMap<H>> {
		self.preload_all()?;
		Ok(self.cache.snapshot())
	}

	/// Number of explicit exports.
	pub fn shared_symbol_count(&self) -> usize {
		self.exports.explicit_len()
	}

	/// Number of symbols resolved so far.
	pub fn cached_symbol_count(&self) -> usize {
		self.cache.len()
	}

	/// Number of package prefixes with at least one candidate.
	pub fn package_export_count(&self) -> usize {
		self.exports.package_len()
	}

	/// Names of the candidate modules for `package`, in registration order.
	pub fn package_candidates(&self, package: &str) -> Vec<String> {
		self.exports
			.candidates(package)
			.iter()
			.map(|module| module.name().to_owned())
			.collect()
	}
}
