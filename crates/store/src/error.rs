use gmeta_identity::IdentityToken;
use thiserror::Error;

use crate::key::MetaKey;
use crate::value::MetaType;

/// Result type for metadata lookups.
pub type Result<T, E = MetadataError> = std::result::Result<T, E>;

/// Errors returned by metadata lookups.
///
/// All variants are local misses; none are transient and none are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
	/// No live record exists for the identity.
	#[error("no metadata for {0}")]
	IdentityNotFound(IdentityToken),
	/// The record exists but does not contain the key.
	#[error("metadata for {identity} has no key `{key}`")]
	KeyNotFound {
		identity: IdentityToken,
		key: MetaKey,
	},
	/// The stored value has a different type than requested.
	#[error("metadata key `{key}` holds {got}, expected {expected}")]
	TypeMismatch {
		key: MetaKey,
		expected: MetaType,
		got: MetaType,
	},
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
	/// The TOML source failed to parse or did not match the schema.
	#[error("invalid metadata config: {0}")]
	Toml(#[from] toml::de::Error),
}
