use std::fmt;

use crate::Symbol;

/// A resolved symbol, as produced by a [`Module`].
///
/// Two handles for the same symbol that compare equal are the same export.
/// Handles that compare unequal are a conflict.
pub trait SymbolHandle: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
	/// Describes the loader that produced this handle, for conflict reports.
	fn provenance(&self) -> String;
}

/// Failure channel of [`Module::resolve_symbol`].
///
/// Callers arbitrating between modules treat every variant as "symbol not
/// present"; the error only ever reaches logs.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
	/// The module has no loader to resolve with (not started, or torn down).
	#[error("module loader unavailable")]
	Unavailable,
	/// The lookup itself failed.
	#[error("lookup failed: {0}")]
	Lookup(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ModuleError {
	pub fn lookup(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
		Self::Lookup(err.into())
	}
}

/// An isolated unit owning a private namespace of symbols.
///
/// Implemented by the loading layer of the container. Modules are owned by the
/// container; everything else holds them through [`crate::ModuleRef`].
pub trait Module: Send + Sync {
	type Handle: SymbolHandle;

	fn name(&self) -> &str;

	/// Attempts to resolve `symbol` from this module's own namespace.
	///
	/// `Ok(None)` means the module does not contain the symbol.
	fn resolve_symbol(&self, symbol: &Symbol) -> Result<Option<Self::Handle>, ModuleError>;
}
