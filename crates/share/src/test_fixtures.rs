//! Stub modules with call-count instrumentation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use enclave_module::{Module, ModuleError, ModuleRef, Symbol, SymbolHandle};
use rustc_hash::FxHashSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TestHandle {
	pub symbol: Symbol,
	pub origin: &'static str,
}

impl TestHandle {
	pub(crate) fn new(symbol: &str, origin: &'static str) -> Self {
		Self {
			symbol: Symbol::new(symbol),
			origin,
		}
	}
}

impl SymbolHandle for TestHandle {
	fn provenance(&self) -> String {
		format!("loader[{}]", self.origin)
	}
}

/// Module that resolves a fixed set of symbols.
pub(crate) struct StubModule {
	name: &'static str,
	symbols: FxHashSet<&'static str>,
	failing: FxHashSet<&'static str>,
	calls: Arc<AtomicUsize>,
}

impl StubModule {
	pub(crate) fn new(name: &'static str) -> Self {
		Self {
			name,
			symbols: FxHashSet::default(),
			failing: FxHashSet::default(),
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub(crate) fn with_symbols(mut self, symbols: &[&'static str]) -> Self {
		self.symbols.extend(symbols);
		self
	}

	/// Makes lookups of `symbols` fail with [`ModuleError`].
	pub(crate) fn failing_on(mut self, symbols: &[&'static str]) -> Self {
		self.failing.extend(symbols);
		self
	}

	/// Returns the shared module and its resolver call counter.
	pub(crate) fn build(self) -> (ModuleRef<TestHandle>, Arc<AtomicUsize>) {
		let calls = Arc::clone(&self.calls);
		(ModuleRef::new(self), calls)
	}
}

impl Module for StubModule {
	type Handle = TestHandle;

	fn name(&self) -> &str {
		self.name
	}

	fn resolve_symbol(&self, symbol: &Symbol) -> Result<Option<TestHandle>, ModuleError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.failing.contains(symbol.as_str()) {
			return Err(ModuleError::lookup(format!("broken archive entry for {symbol}")));
		}
		Ok(self
			.symbols
			.contains(symbol.as_str())
			.then(|| TestHandle::new(symbol.as_str(), self.name)))
	}
}

pub(crate) fn calls(counter: &AtomicUsize) -> usize {
	counter.load(Ordering::SeqCst)
}

/// Routes `tracing` output through the test harness.
pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}
