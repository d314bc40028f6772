//! Identity-keyed object metadata.
//!
//! Attaches key/value metadata to objects by identity rather than value.
//! This crate provides:
//! - [`MetadataStore`]: identity to [`MetadataRecord`] mapping with
//!   initialize, set, and get operations
//! - [`MetadataRegistry`]: isolated stores per scope (module path)
//! - [`metadata!`] and [`set_metadata!`]: module-scoped call-site shorthands
//! - [`StoreConfig`]: missing-identity policy and liveness tracking
//!
//! Identities come from [`gmeta_identity`]: wrap values in [`Tracked`] for a
//! handle identity, or share them through `Arc` for an address identity.

/// Store and registry configuration.
pub mod config;
/// Lookup and configuration errors.
pub mod error;
/// Symbolic record keys.
pub mod key;
mod macros;
/// Per-object key/value records.
pub mod record;
/// Scoped registries.
pub mod registry;
/// Identity-keyed metadata store.
pub mod store;
/// Metadata values.
pub mod value;

pub use config::{MissingIdentity, RegistryConfig, StoreConfig};
pub use error::{ConfigError, MetadataError, Result};
pub use gmeta_identity::{Identity, IdentityToken, Tracked};
pub use key::MetaKey;
pub use record::MetadataRecord;
pub use registry::MetadataRegistry;
pub use store::MetadataStore;
pub use value::{FromMetaValue, MetaType, MetaValue, OpaqueValue};
