//! Object identity primitives.
//!
//! Metadata is keyed by *which* object it belongs to, never by what the
//! object contains. This crate provides:
//! - [`IdentityToken`]: stable, opaque identifier for one object
//! - [`Identity`]: trait for types that can produce a token
//! - [`Liveness`]: non-owning check reporting whether the object still exists
//! - [`Tracked`]: wrapper assigning a fresh handle identity to any value

/// Identity trait and built-in implementations.
pub mod identity;
/// Opaque identity tokens and the handle clock.
pub mod token;
/// Handle-identified value wrapper.
pub mod tracked;

pub use identity::{Identity, Liveness};
pub use token::{IdentityToken, TokenOrigin};
pub use tracked::Tracked;
