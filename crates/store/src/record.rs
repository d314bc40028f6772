//! Per-object metadata records.
//!
//! A [`MetadataRecord`] maps symbolic keys to values. Insertion order is not
//! preserved and equality is map equality.

use rustc_hash::FxHashMap;

use crate::key::MetaKey;
use crate::value::{FromMetaValue, MetaValue};


/// Key/value mapping associated with one identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataRecord {
	values: FxHashMap<MetaKey, MetaValue>,
}

impl MetadataRecord {
	/// Creates an empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty record with room for `capacity` keys.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
		}
	}

	/// Sets `key` to `value`, returning the previous value.
	pub fn insert(
		&mut self,
		key: impl Into<MetaKey>,
		value: impl Into<MetaValue>,
	) -> Option<MetaValue> {
		self.values.insert(key.into(), value.into())
	}

	/// Gets a value, returning `None` if the key is not set.
	pub fn get(&self, key: &str) -> Option<&MetaValue> {
		self.values.get(key)
	}

	/// Gets a value converted to `T`, returning `None` if unset or mistyped.
	pub fn get_as<T: FromMetaValue>(&self, key: &str) -> Option<T> {
		self.get(key).and_then(T::from_meta)
	}

	/// Gets a mutable reference to a value.
	pub fn get_mut(&mut self, key: &str) -> Option<&mut MetaValue> {
		self.values.get_mut(key)
	}

	/// Removes a key from the record.
	pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
		self.values.remove(key)
	}

	/// Returns true if `key` is set.
	pub fn contains_key(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	/// Returns the number of keys set in this record.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns `true` if the record contains no keys.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Removes every key.
	pub fn clear(&mut self) {
		self.values.clear();
	}

	/// Merges another record into this one; keys from `other` win.
	pub fn merge(&mut self, other: &MetadataRecord) {
		for (key, value) in &other.values {
			self.values.insert(key.clone(), value.clone());
		}
	}

	/// Returns an iterator over all set keys.
	pub fn keys(&self) -> impl Iterator<Item = &MetaKey> {
		self.values.keys()
	}

	/// Returns an iterator over all key/value pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&MetaKey, &MetaValue)> {
		self.values.iter()
	}
}

impl<K: Into<MetaKey>, V: Into<MetaValue>> FromIterator<(K, V)> for MetadataRecord {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut record = Self::new();
		record.extend(iter);
		record
	}
}

impl<K: Into<MetaKey>, V: Into<MetaValue>> Extend<(K, V)> for MetadataRecord {
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl IntoIterator for MetadataRecord {
	type Item = (MetaKey, MetaValue);
	type IntoIter = std::collections::hash_map::IntoIter<MetaKey, MetaValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.into_iter()
	}
}

impl<'a> IntoIterator for &'a MetadataRecord {
	type Item = (&'a MetaKey, &'a MetaValue);
	type IntoIter = std::collections::hash_map::Iter<'a, MetaKey, MetaValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.iter()
	}
}

/// Builds a [`MetadataRecord`] from `key => value` pairs.
///
/// ```
/// use gmeta_store::record;
///
/// let data = record! { "color" => "red", "size" => 10 };
/// assert_eq!(data.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
	() => {
		$crate::MetadataRecord::new()
	};
	($($key:expr => $value:expr),+ $(,)?) => {{
		let mut record = $crate::MetadataRecord::new();
		$(record.insert($key, $value);)+
		record
	}};
}
