use std::sync::atomic::{AtomicU64, Ordering};


/// Process-wide handle clock. Handles start at 1 and are never reused.
static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0);

/// How an [`IdentityToken`] was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenOrigin {
	/// Assigned from the monotonic handle clock.
	Handle,
	/// Taken from the address of a live allocation.
	Address,
}

/// Opaque identifier for one object.
///
/// Tokens of different [`TokenOrigin`]s never compare equal, so a handle
/// number can not collide with an allocation address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityToken {
	origin: TokenOrigin,
	raw: u64,
}

impl IdentityToken {
	/// Returns the next handle from the process-wide clock.
	pub fn fresh() -> Self {
		let raw = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
		Self {
			origin: TokenOrigin::Handle,
			raw,
		}
	}

	/// Derives a token from an allocation address.
	///
	/// Address identity is only unique among objects alive at the same time.
	/// Callers that can outlive the object must pair the token with a
	/// [`Liveness`](crate::Liveness) check.
	pub fn from_address<T: ?Sized>(ptr: *const T) -> Self {
		Self {
			origin: TokenOrigin::Address,
			raw: ptr.cast::<()>().addr() as u64,
		}
	}

	/// Derives a token for a `'static` reference.
	///
	/// Zero-sized statics may share an address and therefore a token.
	pub fn of_static<T: ?Sized>(value: &'static T) -> Self {
		Self::from_address(value as *const T)
	}

	/// Returns how this token was derived.
	pub const fn origin(self) -> TokenOrigin {
		self.origin
	}

	/// Returns the raw handle number or address.
	pub const fn raw(self) -> u64 {
		self.raw
	}
}

impl core::fmt::Display for IdentityToken {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self.origin {
			TokenOrigin::Handle => write!(f, "handle#{}", self.raw),
			TokenOrigin::Address => write!(f, "addr:{:#x}", self.raw),
		}
	}
}
