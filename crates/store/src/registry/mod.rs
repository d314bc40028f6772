//! Scoped metadata registries.
//!
//! A [`MetadataRegistry`] holds one [`MetadataStore`] per scope name. The
//! call-site macros use the caller's `module_path!()` as the scope, so each
//! module sees its own metadata for the same object.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::store::MetadataStore;

#[cfg(test)]
mod tests;

/// Named collection of isolated metadata stores.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
	config: RegistryConfig,
	scopes: RwLock<FxHashMap<&'static str, Arc<MetadataStore>>>,
}

impl MetadataRegistry {
	/// Creates an empty registry with the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry.
	pub fn with_config(config: RegistryConfig) -> Self {
		Self {
			config,
			scopes: RwLock::new(FxHashMap::default()),
		}
	}

	/// Returns the registry configuration.
	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Returns the store for `scope`, creating it on first use.
	pub fn scope(&self, scope: &'static str) -> Arc<MetadataStore> {
		if let Some(store) = self.scopes.read().get(scope) {
			return Arc::clone(store);
		}

		let mut scopes = self.scopes.write();
		let store = scopes.entry(scope).or_insert_with(|| {
			debug!(scope, "created metadata scope");
			Arc::new(MetadataStore::with_config(self.config.store.clone()))
		});
		Arc::clone(store)
	}

	/// Returns the store for `scope` if it exists.
	pub fn get_scope(&self, scope: &str) -> Option<Arc<MetadataStore>> {
		self.scopes.read().get(scope).cloned()
	}

	/// Returns the names of all scopes, sorted.
	pub fn scopes(&self) -> Vec<&'static str> {
		let mut names: Vec<_> = self.scopes.read().keys().copied().collect();
		names.sort_unstable();
		names
	}

	/// Detaches `scope` from the registry.
	///
	/// Handles obtained earlier from [`Self::scope`] keep working on the
	/// detached store.
	pub fn remove_scope(&self, scope: &str) -> Option<Arc<MetadataStore>> {
		let removed = self.scopes.write().remove(scope);
		if removed.is_some() {
			debug!(scope, "removed metadata scope");
		}
		removed
	}

	/// Purges stale entries in every scope, returning the total reclaimed.
	pub fn purge_stale(&self) -> usize {
		let stores: Vec<_> = self.scopes.read().values().cloned().collect();
		stores.iter().map(|store| store.purge_stale()).sum()
	}
}
