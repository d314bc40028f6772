//! Store configuration.
//!
//! Configuration is plain data with serde defaults, so an empty TOML document
//! yields [`StoreConfig::default`]:
//!
//! ```toml
//! missing_identity = "empty"
//! initial_capacity = 64
//! track_liveness = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;


/// Read behavior for identities that have no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingIdentity {
	/// Fail with [`MetadataError::IdentityNotFound`](crate::MetadataError::IdentityNotFound).
	#[default]
	Error,
	/// Behave as if the identity had an empty record. No entry is created.
	Empty,
}

/// Configuration for one [`MetadataStore`](crate::MetadataStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
	/// What reads return for identities without a record.
	pub missing_identity: MissingIdentity,
	/// Number of identities to reserve room for up front.
	pub initial_capacity: usize,
	/// Keep non-owning liveness checks for handle identities so entries of
	/// dropped [`Tracked`](gmeta_identity::Tracked) values are hidden from
	/// reads and can be purged.
	///
	/// Address identities always keep their liveness check: it reserves the
	/// allocation, so a new object can not inherit a dropped object's address
	/// or metadata.
	pub track_liveness: bool,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			missing_identity: MissingIdentity::default(),
			initial_capacity: 0,
			track_liveness: true,
		}
	}
}

impl StoreConfig {
	/// Parses a configuration from TOML.
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}

	/// Sets the missing-identity policy.
	pub fn with_missing_identity(mut self, policy: MissingIdentity) -> Self {
		self.missing_identity = policy;
		self
	}

	/// Sets the initial identity capacity.
	pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
		self.initial_capacity = capacity;
		self
	}

	/// Enables or disables liveness tracking.
	pub fn with_liveness(mut self, track: bool) -> Self {
		self.track_liveness = track;
		self
	}
}

/// Configuration for a [`MetadataRegistry`](crate::MetadataRegistry).
///
/// ```toml
/// [store]
/// missing_identity = "error"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Applied to every scope the registry creates.
	pub store: StoreConfig,
}

impl RegistryConfig {
	/// Parses a configuration from TOML.
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}
}
