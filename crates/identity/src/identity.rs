use std::sync::{Arc, Weak};

use crate::IdentityToken;


/// Non-owning check reporting whether an identified object still exists.
pub trait Liveness: Send + Sync {
	/// Returns true while the object is reachable through its owners.
	fn is_alive(&self) -> bool;
}

impl<T: ?Sized + Send + Sync> Liveness for Weak<T> {
	fn is_alive(&self) -> bool {
		self.strong_count() > 0
	}
}

/// Types whose storage identity can key per-object data.
///
/// Implementations must return the same token for the whole lifetime of the
/// object and distinct tokens for distinct live objects, regardless of value
/// equality.
pub trait Identity {
	/// Returns the identity token of this object.
	fn identity(&self) -> IdentityToken;

	/// Returns a liveness check that outlives `self` without keeping it alive.
	///
	/// `None` means the identity never goes stale (handles, statics, raw
	/// tokens).
	fn liveness(&self) -> Option<Box<dyn Liveness>> {
		None
	}
}

impl Identity for IdentityToken {
	fn identity(&self) -> IdentityToken {
		*self
	}
}

/// Shared allocations are identified by address. Clones of one `Arc` share
/// an identity; the liveness check is a [`Weak`] to the same allocation.
///
/// An `Arc<Tracked<T>>` has two identities: the `Arc` address (`&arc`) and
/// the inner handle (`&*arc`). Pick one form per object; the handle is the
/// canonical one since it survives moving the value out of the `Arc`.
impl<T: ?Sized + Send + Sync + 'static> Identity for Arc<T> {
	fn identity(&self) -> IdentityToken {
		IdentityToken::from_address(Arc::as_ptr(self))
	}

	fn liveness(&self) -> Option<Box<dyn Liveness>> {
		Some(Box::new(Arc::downgrade(self)))
	}
}

impl<T: Identity + ?Sized> Identity for &T {
	fn identity(&self) -> IdentityToken {
		(**self).identity()
	}

	fn liveness(&self) -> Option<Box<dyn Liveness>> {
		(**self).liveness()
	}
}
