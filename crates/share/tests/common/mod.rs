#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use enclave_share::{Module, ModuleError, ModuleRef, Symbol, SymbolHandle};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedSymbol {
	pub symbol: String,
	pub module: &'static str,
	/// Which load of the symbol produced this handle.
	pub generation: u32,
}

impl SymbolHandle for LoadedSymbol {
	fn provenance(&self) -> String {
		format!("{}#{}", self.module, self.generation)
	}
}

/// Module that knows a fixed symbol list.
///
/// With `reloading` set every lookup produces a fresh generation, like a loader
/// that defines the same class twice.
pub struct ListModule {
	name: &'static str,
	symbols: Vec<&'static str>,
	reloading: bool,
	generation: AtomicU32,
	pub calls: Arc<AtomicUsize>,
}

impl ListModule {
	pub fn new(name: &'static str, symbols: &[&'static str]) -> Self {
		Self {
			name,
			symbols: symbols.to_vec(),
			reloading: false,
			generation: AtomicU32::new(0),
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn reloading(mut self) -> Self {
		self.reloading = true;
		self
	}

	pub fn shared(self) -> (ModuleRef<LoadedSymbol>, Arc<AtomicUsize>) {
		let calls = Arc::clone(&self.calls);
		(ModuleRef::new(self), calls)
	}
}

impl Module for ListModule {
	type Handle = LoadedSymbol;

	fn name(&self) -> &str {
		self.name
	}

	fn resolve_symbol(&self, symbol: &Symbol) -> Result<Option<LoadedSymbol>, ModuleError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if !self.symbols.iter().any(|known| *known == symbol.as_str()) {
			return Ok(None);
		}
		let generation = if self.reloading {
			self.generation.fetch_add(1, Ordering::SeqCst)
		} else {
			0
		};
		Ok(Some(LoadedSymbol {
			symbol: symbol.to_string(),
			module: self.name,
			generation,
		}))
	}
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
