use std::borrow::{Borrow, Cow};

/// Symbolic key within a metadata record.
///
/// Static names are stored without allocation. Enumerated keys convert
/// through `From`/`Into` implementations on the caller's side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetaKey(Cow<'static, str>);

impl MetaKey {
	/// Creates a key from a static name.
	pub const fn from_static(name: &'static str) -> Self {
		Self(Cow::Borrowed(name))
	}

	/// Returns the key name.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&'static str> for MetaKey {
	fn from(name: &'static str) -> Self {
		Self::from_static(name)
	}
}

impl From<String> for MetaKey {
	fn from(name: String) -> Self {
		Self(Cow::Owned(name))
	}
}

impl Borrow<str> for MetaKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for MetaKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl core::fmt::Display for MetaKey {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(&self.0)
	}
}
