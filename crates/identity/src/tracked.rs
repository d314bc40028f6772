use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::{Identity, IdentityToken, Liveness};


/// Value wrapper carrying a handle identity assigned at construction.
///
/// Equality and hashing of the wrapped value are unaffected: two `Tracked`
/// values may compare equal while having different identities. Cloning
/// produces a new object and therefore a new identity.
///
/// When a `Tracked` value is shared through an `Arc`, key metadata by the
/// handle (`&*arc`) rather than the `Arc` address (`&arc`); the two are
/// distinct identities.
pub struct Tracked<T> {
	token: IdentityToken,
	anchor: Arc<()>,
	value: T,
}

impl<T> Tracked<T> {
	/// Wraps `value` under a fresh handle.
	pub fn new(value: T) -> Self {
		Self {
			token: IdentityToken::fresh(),
			anchor: Arc::new(()),
			value,
		}
	}

	/// Returns the handle token.
	pub const fn token(&self) -> IdentityToken {
		self.token
	}

	/// Returns a reference to the wrapped value.
	pub const fn get(&self) -> &T {
		&self.value
	}

	/// Unwraps the value, ending this identity.
	pub fn into_inner(self) -> T {
		self.value
	}
}

impl<T> Identity for Tracked<T> {
	fn identity(&self) -> IdentityToken {
		self.token
	}

	fn liveness(&self) -> Option<Box<dyn Liveness>> {
		Some(Box::new(Arc::downgrade(&self.anchor)))
	}
}

impl<T> Deref for Tracked<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.value
	}
}

impl<T> DerefMut for Tracked<T> {
	fn deref_mut(&mut self) -> &mut T {
		&mut self.value
	}
}

impl<T: Clone> Clone for Tracked<T> {
	fn clone(&self) -> Self {
		Self::new(self.value.clone())
	}
}

impl<T: Default> Default for Tracked<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: PartialEq> PartialEq for Tracked<T> {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl<T: Eq> Eq for Tracked<T> {}

impl<T: Hash> Hash for Tracked<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.value.hash(state);
	}
}

impl<T: core::fmt::Debug> core::fmt::Debug for Tracked<T> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Tracked")
			.field("token", &self.token)
			.field("value", &self.value)
			.finish()
	}
}

impl<T> From<T> for Tracked<T> {
	fn from(value: T) -> Self {
		Self::new(value)
	}
}
