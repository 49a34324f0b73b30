#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Shared symbol registry for isolated module containers.
//!
//! # Purpose
//!
//! Every module of a container owns a private symbol namespace. Modules may
//! export some of their symbols to the rest of the container, either one by one
//! or as whole package prefixes. [`ShareService`] is the single arbiter of
//! "who owns symbol X": it resolves a symbol to exactly one module, caches the
//! answer, and fails loudly when two modules export the same symbol instead of
//! letting one silently shadow the other.
//!
//! # Mental Model
//!
//! 1. **Registration:** the container calls [`ShareService::add_explicit_export`]
//!    and [`ShareService::add_package_export`] while initializing modules.
//! 2. **Preload (optional):** [`ShareService::preload_all`] resolves every
//!    explicit export once, warming the cache and surfacing exports a module
//!    cannot actually produce.
//! 3. **Resolution:** [`ShareService::resolve`] checks the cache, then the
//!    explicit export, then walks the symbol's package prefixes from most to
//!    least specific.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`ShareService`] | Per-container registry, cache and preload latch. |
//! | [`Collision`] | Two owners observed for one symbol. |
//! | [`ShareError`] | Conflicts and missing exports. |
//! | [`SharedSymbolMap`] | Immutable snapshot of resolved symbols. |
//! | [`ShareConfig`] | Nested-name separator and preload strictness. |
//!
//! # Concurrency
//!
//! - Registration and resolution may race freely; all tables are concurrent
//!   maps and no lock is held while a module resolves a symbol.
//! - Two threads may resolve the same uncached symbol at once. Equal answers
//!   cost duplicate work only; unequal answers are a [`Collision`].
//! - Preload runs at most once per service.
//!
//! # Invariants
//!
//! - An explicit export never changes owner.
//!   - Enforced in: [`exports::ExportRegistry::add_explicit`].
//! - A cache entry never changes once written.
//!   - Enforced in: [`cache::ResolutionCache::publish`] (atomic insert-or-compare).
//! - A package probe with more than one hit never writes the cache.
//!   - Enforced in: [`resolve::Resolver`].
//! - Nothing is ever removed.

mod cache;
mod collision;
mod config;
mod error;
mod exports;
mod preload;
mod resolve;
mod service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use cache::SharedSymbolMap;
pub use collision::{Collision, CollisionKind};
pub use config::ShareConfig;
pub use enclave_module::{Module, ModuleError, ModuleRef, Symbol, SymbolHandle};
pub use error::{ConfigError, Result, ShareError};
pub use resolve::{Resolved, ResolvedVia};
pub use service::ShareService;
