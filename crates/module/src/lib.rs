//! Module and symbol vocabulary for isolated module containers.
//!
//! A container loads every module into its own private namespace. This crate
//! defines the narrow surface the rest of the container sees of a module:
//!
//! - [`Symbol`] - a dot-delimited qualified name such as `a.b.C`.
//! - [`Module`] - something with a name that can try to resolve a [`Symbol`].
//! - [`SymbolHandle`] - what a module hands back once it resolved a symbol.
//! - [`ModuleRef`] - a shared, identity-compared reference to a module.
//!
//! How a module actually finds its symbols (archives, class paths, remote
//! storage) stays behind [`Module::resolve_symbol`].

mod module;
mod module_ref;
mod symbol;

pub use module::{Module, ModuleError, SymbolHandle};
pub use module_ref::ModuleRef;
pub use symbol::{PACKAGE_SEPARATOR, Packages, Symbol};
