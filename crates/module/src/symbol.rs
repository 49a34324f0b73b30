//! Qualified symbol names.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;


/// Separator between the segments of a qualified name.
pub const PACKAGE_SEPARATOR: char = '.';

/// A fully-qualified, dot-delimited symbol name.
///
/// Symbols are immutable and cheap to clone. They hash and compare like the
/// underlying string, so maps keyed by [`Symbol`] can be queried with `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
	pub fn new(name: impl Into<Arc<str>>) -> Self {
		Self(name.into())
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the name is empty or whitespace only.
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}

	/// Iterates the package ancestry of this symbol, most specific first.
	///
	/// `a.b.C` yields `a.b` then `a`. A separator at index 0 never starts a
	/// package, so `.C` and `C` yield nothing.
	pub fn packages(&self) -> Packages<'_> {
		Packages { rest: &self.0 }
	}

	/// Returns true if the name denotes a nested type, i.e. contains `separator`.
	pub fn is_nested(&self, separator: char) -> bool {
		self.0.contains(separator)
	}
}

impl fmt::Debug for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for Symbol {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for Symbol {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Symbol {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for Symbol {
	fn from(name: String) -> Self {
		Self::new(name)
	}
}

impl PartialEq<str> for Symbol {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for Symbol {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

/// Iterator over the package prefixes of a [`Symbol`].
///
/// Returned by [`Symbol::packages`].
#[derive(Debug, Clone)]
pub struct Packages<'a> {
	rest: &'a str,
}

impl<'a> Iterator for Packages<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<&'a str> {
		match self.rest.rfind(PACKAGE_SEPARATOR) {
			Some(idx) if idx > 0 => {
				self.rest = &self.rest[..idx];
				Some(self.rest)
			}
			_ => {
				self.rest = "";
				None
			}
		}
	}
}

impl std::iter::FusedIterator for Packages<'_> {}
