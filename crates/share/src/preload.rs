//! Eager resolution of explicit exports.
//!
//! Preloading drains every explicit binding through the explicit tier of the
//! [`Resolver`], warming the cache and failing fast on exports a module declared
//! but cannot produce. It runs at most once per service.
//!
//! The latch only keeps the pass from running twice. Callers arriving while the
//! first pass is still running return immediately and may observe a partially
//! warmed cache.

use std::sync::atomic::{AtomicBool, Ordering};

use enclave_module::SymbolHandle;

use crate::cache::ResolutionCache;
use crate::exports::ExportRegistry;
use crate::resolve::Resolver;
use crate::{Result, ShareConfig, ShareError};

/// One-shot latch guarding the preload pass.
#[derive(Debug, Default)]
pub(crate) struct PreloadLatch(AtomicBool);

impl PreloadLatch {
	/// Flips the latch. Returns true for exactly one caller.
	pub(crate) fn try_acquire(&self) -> bool {
		self.0
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_ok()
	}

	pub(crate) fn is_set(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PreloadStats {
	pub resolved: usize,
	pub tolerated_misses: usize,
}

/// Resolves every explicit export, in symbol order.
///
/// Stops at the first conflict, or at the first missing top-level export when
/// [`ShareConfig::fail_on_missing_export`] is set.
pub(crate) fn preload_exports<H: SymbolHandle>(
	exports: &ExportRegistry<H>,
	cache: &ResolutionCache<H>,
	config: &ShareConfig,
) -> Result<PreloadStats> {
	let resolver = Resolver::new(exports, cache);
	let mut stats = PreloadStats::default();

	for (symbol, module) in exports.explicit_bindings() {
		if resolver.resolve_explicit(&symbol, &module)?.is_some() {
			stats.resolved += 1;
			continue;
		}

		if symbol.is_nested(config.nested_separator) {
			tracing::debug!(%symbol, module = module.name(), "nested export not loadable; ignoring");
			stats.tolerated_misses += 1;
		} else if config.fail_on_missing_export {
			return Err(ShareError::MissingExport {
				symbol,
				module: module.name().to_owned(),
			});
		} else {
			tracing::warn!(%symbol, module = module.name(), "explicit export not loadable");
			stats.tolerated_misses += 1;
		}
	}

	Ok(stats)
}
