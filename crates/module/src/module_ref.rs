//! Identity-compared module references.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::{Module, SymbolHandle};

/// Shared reference to a container-owned [`Module`].
///
/// Equality and hashing are by identity: two references are equal only if they
/// point at the same module instance, regardless of name.
pub struct ModuleRef<H: SymbolHandle>(Arc<dyn Module<Handle = H>>);

impl<H: SymbolHandle> ModuleRef<H> {
	pub fn new<M>(module: M) -> Self
	where
		M: Module<Handle = H> + 'static,
	{
		Self(Arc::new(module))
	}

	/// Returns true if both references point at the same module instance.
	#[inline]
	pub fn ptr_eq(&self, other: &Self) -> bool {
		self.addr() == other.addr()
	}

	#[inline]
	fn addr(&self) -> *const () {
		Arc::as_ptr(&self.0) as *const ()
	}
}

impl<H: SymbolHandle> From<Arc<dyn Module<Handle = H>>> for ModuleRef<H> {
	fn from(module: Arc<dyn Module<Handle = H>>) -> Self {
		Self(module)
	}
}

impl<H: SymbolHandle> Clone for ModuleRef<H> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}

impl<H: SymbolHandle> Deref for ModuleRef<H> {
	type Target = dyn Module<Handle = H>;

	fn deref(&self) -> &Self::Target {
		&*self.0
	}
}

impl<H: SymbolHandle> PartialEq for ModuleRef<H> {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl<H: SymbolHandle> Eq for ModuleRef<H> {}

impl<H: SymbolHandle> Hash for ModuleRef<H> {
	fn hash<S: Hasher>(&self, state: &mut S) {
		self.addr().hash(state);
	}
}

impl<H: SymbolHandle> fmt::Debug for ModuleRef<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ModuleRef").field(&self.0.name()).finish()
	}
}
