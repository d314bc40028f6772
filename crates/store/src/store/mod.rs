//! Identity-keyed metadata storage.
//!
//! The [`MetadataStore`] maps object identities to [`MetadataRecord`]s. It
//! never owns the objects it describes: address identities keep a
//! non-owning liveness check, and entries whose object has been dropped are
//! treated as absent until a write replaces them or [`MetadataStore::purge_stale`]
//! reclaims them.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use gmeta_store::{MetaValue, MetadataStore, record};
//!
//! let store = MetadataStore::new();
//! let obj = Arc::new(String::from("widget"));
//!
//! store.initialize(&obj, record! { "color" => "red" });
//! assert_eq!(store.get(&obj, "color").unwrap(), MetaValue::from("red"));
//!
//! store.set(&obj, "size", 10);
//! assert_eq!(store.record(&obj).unwrap(), record! { "color" => "red", "size" => 10 });
//! ```

use std::collections::hash_map::Entry;

use gmeta_identity::{Identity, IdentityToken, Liveness, TokenOrigin};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::config::{MissingIdentity, StoreConfig};
use crate::error::{MetadataError, Result};
use crate::key::MetaKey;
use crate::record::MetadataRecord;
use crate::value::{FromMetaValue, MetaValue};

#[cfg(test)]
mod tests;

/// One registry entry: the record plus an optional liveness check on its object.
struct Slot {
	record: MetadataRecord,
	liveness: Option<Box<dyn Liveness>>,
}

impl Slot {
	fn new(record: MetadataRecord, liveness: Option<Box<dyn Liveness>>) -> Self {
		Self { record, liveness }
	}

	fn is_live(&self) -> bool {
		self.liveness.as_ref().is_none_or(|p| p.is_alive())
	}
}

/// Mapping from object identity to metadata record.
///
/// A single reader/writer lock guards both mapping levels: writers are
/// serialized, readers proceed concurrently. Reads return clones so no guard
/// escapes a call.
pub struct MetadataStore {
	config: StoreConfig,
	slots: RwLock<FxHashMap<IdentityToken, Slot>>,
}

impl Default for MetadataStore {
	fn default() -> Self {
		Self::with_config(StoreConfig::default())
	}
}

impl core::fmt::Debug for MetadataStore {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("MetadataStore")
			.field("config", &self.config)
			.field("entries", &self.slots.read().len())
			.finish()
	}
}

impl MetadataStore {
	/// Creates an empty store with the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty store.
	pub fn with_config(config: StoreConfig) -> Self {
		let slots = FxHashMap::with_capacity_and_hasher(config.initial_capacity, Default::default());
		Self {
			config,
			slots: RwLock::new(slots),
		}
	}

	/// Returns the store configuration.
	pub fn config(&self) -> &StoreConfig {
		&self.config
	}

	/// Address identities are always watched; only handles, which are
	/// never reused, may go unwatched.
	fn liveness_for<I: Identity + ?Sized>(&self, object: &I) -> Option<Box<dyn Liveness>> {
		let is_address = object.identity().origin() == TokenOrigin::Address;
		if is_address || self.config.track_liveness {
			object.liveness()
		} else {
			None
		}
	}

	/// Initializes the metadata of `object` to `data`, replacing any prior
	/// record.
	pub fn initialize<I: Identity + ?Sized>(&self, object: &I, data: MetadataRecord) {
		let token = object.identity();
		let slot = Slot::new(data, self.liveness_for(object));
		let prev = self.slots.write().insert(token, slot);

		match prev {
			Some(prev) if prev.is_live() => {
				debug!(identity = %token, discarded = prev.record.len(), "replaced metadata record");
			}
			Some(_) => debug!(identity = %token, "replaced stale metadata entry"),
			None => trace!(identity = %token, "initialized metadata record"),
		}
	}

	/// Initializes the metadata of `object` to an empty record.
	pub fn initialize_empty<I: Identity + ?Sized>(&self, object: &I) {
		self.initialize(object, MetadataRecord::new());
	}

	/// Sets `key` to `value` in the record of `object`, creating an empty
	/// record first if none exists.
	pub fn set<I: Identity + ?Sized>(
		&self,
		object: &I,
		key: impl Into<MetaKey>,
		value: impl Into<MetaValue>,
	) {
		let key = key.into();
		trace!(identity = %object.identity(), key = %key, "set metadata");
		self.update(object, |record| {
			record.insert(key, value);
		});
	}

	/// Runs `f` on the record of `object` under the write lock, creating an
	/// empty record first if none exists.
	///
	/// `f` must not call back into this store.
	pub fn update<I: Identity + ?Sized, R>(
		&self,
		object: &I,
		f: impl FnOnce(&mut MetadataRecord) -> R,
	) -> R {
		let token = object.identity();
		let mut slots = self.slots.write();
		let slot = match slots.entry(token) {
			Entry::Occupied(entry) => {
				let slot = entry.into_mut();
				if !slot.is_live() {
					debug!(identity = %token, "replaced stale metadata entry");
					*slot = Slot::new(MetadataRecord::new(), self.liveness_for(object));
				} else if slot.liveness.is_none() {
					slot.liveness = self.liveness_for(object);
				}
				slot
			}
			Entry::Vacant(entry) => entry.insert(Slot::new(MetadataRecord::new(), self.liveness_for(object))),
		};
		f(&mut slot.record)
	}

	/// Runs `f` on the live record for `token`, or `None` when there is none.
	fn with_record<R>(&self, token: IdentityToken, f: impl FnOnce(Option<&MetadataRecord>) -> R) -> R {
		let slots = self.slots.read();
		let record = slots.get(&token).filter(|slot| slot.is_live()).map(|slot| &slot.record);
		f(record)
	}

	/// Resolves the missing-identity policy into an error or an empty lookup.
	fn missing(&self, token: IdentityToken) -> Result<()> {
		match self.config.missing_identity {
			MissingIdentity::Error => Err(MetadataError::IdentityNotFound(token)),
			MissingIdentity::Empty => Ok(()),
		}
	}

	/// Returns the value at `key` in the record of `object`.
	///
	/// Fails with [`MetadataError::KeyNotFound`] when the record lacks `key`,
	/// and with [`MetadataError::IdentityNotFound`] when there is no record
	/// (unless configured with [`MissingIdentity::Empty`]). Never creates a
	/// record.
	pub fn get<I: Identity + ?Sized>(&self, object: &I, key: impl AsRef<str>) -> Result<MetaValue> {
		let token = object.identity();
		let key = key.as_ref();
		let found = self.with_record(token, |record| record.map(|r| r.get(key).cloned()));
		match found {
			Some(Some(value)) => Ok(value),
			Some(None) => Err(key_not_found(token, key)),
			None => {
				self.missing(token)?;
				Err(key_not_found(token, key))
			}
		}
	}

	/// Returns the value at `key` converted to `T`.
	pub fn get_as<T: FromMetaValue>(
		&self,
		object: &(impl Identity + ?Sized),
		key: impl AsRef<str>,
	) -> Result<T> {
		let key = key.as_ref();
		let value = self.get(object, key)?;
		T::from_meta(&value).ok_or_else(|| MetadataError::TypeMismatch {
			key: MetaKey::from(key.to_owned()),
			expected: T::meta_type(),
			got: value.meta_type(),
		})
	}

	/// Returns a snapshot of the full record of `object`.
	///
	/// Without a record this fails with [`MetadataError::IdentityNotFound`],
	/// or returns an empty record under [`MissingIdentity::Empty`]. Never
	/// creates a record.
	pub fn record<I: Identity + ?Sized>(&self, object: &I) -> Result<MetadataRecord> {
		let token = object.identity();
		match self.with_record(token, |record| record.cloned()) {
			Some(record) => Ok(record),
			None => {
				self.missing(token)?;
				Ok(MetadataRecord::new())
			}
		}
	}

	/// Returns true if `object` has a live record.
	pub fn contains<I: Identity + ?Sized>(&self, object: &I) -> bool {
		self.with_record(object.identity(), |record| record.is_some())
	}

	/// Returns true if the record of `object` contains `key`.
	pub fn contains_key<I: Identity + ?Sized>(&self, object: &I, key: impl AsRef<str>) -> bool {
		self.with_record(object.identity(), |record| {
			record.is_some_and(|r| r.contains_key(key.as_ref()))
		})
	}

	/// Removes the record of `object`, returning it if it was live.
	pub fn remove<I: Identity + ?Sized>(&self, object: &I) -> Option<MetadataRecord> {
		let token = object.identity();
		let slot = self.slots.write().remove(&token)?;
		trace!(identity = %token, "removed metadata record");
		slot.is_live().then_some(slot.record)
	}

	/// Removes `key` from the record of `object`, returning its value.
	///
	/// A missing identity follows the configured [`MissingIdentity`] policy.
	pub fn remove_key<I: Identity + ?Sized>(
		&self,
		object: &I,
		key: impl AsRef<str>,
	) -> Result<Option<MetaValue>> {
		let token = object.identity();
		let mut slots = self.slots.write();
		match slots.get_mut(&token).filter(|slot| slot.is_live()) {
			Some(slot) => Ok(slot.record.remove(key.as_ref())),
			None => {
				self.missing(token)?;
				Ok(None)
			}
		}
	}

	/// Returns the identities with live records, sorted.
	pub fn identities(&self) -> Vec<IdentityToken> {
		let slots = self.slots.read();
		let mut tokens: Vec<_> = slots
			.iter()
			.filter(|(_, slot)| slot.is_live())
			.map(|(token, _)| *token)
			.collect();
		tokens.sort_unstable();
		tokens
	}

	/// Returns the number of live records.
	pub fn len(&self) -> usize {
		self.slots.read().values().filter(|slot| slot.is_live()).count()
	}

	/// Returns `true` if the store holds no live records.
	pub fn is_empty(&self) -> bool {
		self.slots.read().values().all(|slot| !slot.is_live())
	}

	/// Returns the number of stale entries awaiting [`Self::purge_stale`].
	pub fn stale_len(&self) -> usize {
		self.slots.read().values().filter(|slot| !slot.is_live()).count()
	}

	/// Removes every entry, returning how many were dropped.
	pub fn clear(&self) -> usize {
		let mut slots = self.slots.write();
		let count = slots.len();
		slots.clear();
		debug!(count, "cleared metadata store");
		count
	}

	/// Drops entries whose objects no longer exist, returning how many were
	/// reclaimed.
	pub fn purge_stale(&self) -> usize {
		let mut slots = self.slots.write();
		let before = slots.len();
		slots.retain(|_, slot| slot.is_live());
		let purged = before - slots.len();
		if purged > 0 {
			debug!(purged, remaining = slots.len(), "purged stale metadata entries");
		}
		purged
	}
}

fn key_not_found(identity: IdentityToken, key: &str) -> MetadataError {
	MetadataError::KeyNotFound {
		identity,
		key: MetaKey::from(key.to_owned()),
	}
}
