use std::collections::HashMap;
use std::sync::Arc;

use gmeta_identity::Tracked;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;
use crate::record;

#[fixture]
fn store() -> MetadataStore {
	MetadataStore::new()
}

#[fixture]
fn lenient() -> MetadataStore {
	MetadataStore::with_config(StoreConfig::default().with_missing_identity(MissingIdentity::Empty))
}

#[rstest]
fn color_and_size_scenario(store: MetadataStore) {
	let obj = Tracked::new("widget");
	store.initialize(&obj, record! { "color" => "red" });
	assert_eq!(store.get(&obj, "color").unwrap(), MetaValue::from("red"));

	store.set(&obj, "size", 10);
	assert_eq!(
		store.record(&obj).unwrap(),
		record! { "color" => "red", "size" => 10 }
	);
}

#[rstest]
fn set_creates_record(store: MetadataStore) {
	let obj = Tracked::new(0);
	store.set(&obj, "k1", "v1");
	store.set(&obj, "k2", 2);
	assert_eq!(store.record(&obj).unwrap(), record! { "k1" => "v1", "k2" => 2 });
	assert_eq!(store.len(), 1);
}

#[rstest]
fn set_overwrites(store: MetadataStore) {
	let obj = Tracked::new(0);
	store.set(&obj, "k", 1);
	store.set(&obj, "k", 2);
	assert_eq!(store.get(&obj, "k").unwrap(), MetaValue::Int(2));
}

#[rstest]
fn initialize_replaces_record(store: MetadataStore) {
	let obj = Tracked::new(0);
	store.set(&obj, "a", 1);
	store.set(&obj, "b", 2);
	store.initialize(&obj, record! { "c" => 3 });
	assert_eq!(store.record(&obj).unwrap(), record! { "c" => 3 });
	assert!(matches!(
		store.get(&obj, "a"),
		Err(MetadataError::KeyNotFound { .. })
	));

	store.initialize_empty(&obj);
	assert!(store.record(&obj).unwrap().is_empty());
	assert!(store.contains(&obj));
}

#[rstest]
fn value_equal_objects_are_separate(store: MetadataStore) {
	let a = Tracked::new(String::from("same"));
	let b = Tracked::new(String::from("same"));
	assert_eq!(a, b);

	store.set(&a, "owner", "a");
	assert!(!store.contains(&b));
	assert_eq!(
		store.get(&b, "owner"),
		Err(MetadataError::IdentityNotFound(b.token()))
	);
}

#[rstest]
fn missing_identity_fails_without_creating(store: MetadataStore) {
	let obj = Tracked::new(());
	assert_eq!(
		store.get(&obj, "k"),
		Err(MetadataError::IdentityNotFound(obj.token()))
	);
	assert_eq!(
		store.record(&obj),
		Err(MetadataError::IdentityNotFound(obj.token()))
	);
	assert_eq!(
		store.remove_key(&obj, "k"),
		Err(MetadataError::IdentityNotFound(obj.token()))
	);
	assert!(!store.contains(&obj));
	assert!(store.is_empty());
}

#[rstest]
fn missing_key_reports_identity(store: MetadataStore) {
	let obj = Tracked::new(());
	store.initialize_empty(&obj);
	let err = store.get(&obj, "nope").unwrap_err();
	assert_eq!(
		err,
		MetadataError::KeyNotFound {
			identity: obj.token(),
			key: MetaKey::from("nope"),
		}
	);
	assert!(err.to_string().contains("`nope`"));
}

#[rstest]
fn lenient_policy_reads_empty(lenient: MetadataStore) {
	let obj = Tracked::new(());
	assert_eq!(lenient.record(&obj).unwrap(), MetadataRecord::new());
	assert!(matches!(
		lenient.get(&obj, "k"),
		Err(MetadataError::KeyNotFound { .. })
	));
	assert_eq!(lenient.remove_key(&obj, "k"), Ok(None));
	assert!(!lenient.contains(&obj));
	assert_eq!(lenient.len(), 0);
}

#[rstest]
fn arc_clones_share_metadata(store: MetadataStore) {
	let obj = Arc::new(vec![1, 2, 3]);
	let alias = Arc::clone(&obj);
	let twin = Arc::new(vec![1, 2, 3]);

	store.set(&obj, "seen", true);
	assert_eq!(store.get_as::<bool>(&alias, "seen"), Ok(true));
	assert!(!store.contains(&twin));
}

#[rstest]
fn dropped_arc_goes_stale(store: MetadataStore) {
	let obj = Arc::new(String::from("temp"));
	store.set(&obj, "k", 1);
	let token = obj.identity();
	assert!(store.contains(&token));

	drop(obj);
	assert!(!store.contains(&token));
	assert_eq!(store.len(), 0);
	assert_eq!(store.stale_len(), 1);
	assert!(store.identities().is_empty());

	assert_eq!(store.purge_stale(), 1);
	assert_eq!(store.stale_len(), 0);
	assert_eq!(store.purge_stale(), 0);
}

#[rstest]
fn write_replaces_stale_entry(store: MetadataStore) {
	let obj = Tracked::new(1);
	let token = obj.token();
	store.set(&obj, "old", 1);
	drop(obj);

	store.set(&token, "new", 2);
	assert_eq!(store.record(&token).unwrap(), record! { "new" => 2 });
	assert_eq!(store.stale_len(), 0);
}

#[rstest]
fn initialize_over_stale_entry(store: MetadataStore) {
	let obj = Tracked::new(1);
	let token = obj.token();
	store.set(&obj, "old", 1);
	drop(obj);

	store.initialize(&token, record! { "fresh" => true });
	assert_eq!(store.record(&token).unwrap(), record! { "fresh" => true });
}

#[test]
fn untracked_liveness_keeps_handle_entries() {
	let store = MetadataStore::with_config(StoreConfig::default().with_liveness(false));
	let obj = Tracked::new(5u8);
	store.set(&obj, "k", 1);
	let token = obj.token();
	drop(obj);

	assert!(store.contains(&token));
	assert_eq!(store.purge_stale(), 0);
	assert_eq!(store.len(), 1);
}

#[test]
fn untracked_liveness_still_watches_addresses() {
	let store = MetadataStore::with_config(StoreConfig::default().with_liveness(false));
	let obj = Arc::new(7u64);
	store.set(&obj, "secret", 1);
	let token = obj.identity();
	drop(obj);

	let fresh = Arc::new(7u64);
	assert_eq!(
		store.get(&fresh, "secret"),
		Err(MetadataError::IdentityNotFound(fresh.identity()))
	);
	assert!(!store.contains(&token));
	assert_eq!(store.purge_stale(), 1);
}

#[rstest]
fn new_arcs_never_inherit_dropped_metadata(store: MetadataStore) {
	let obj = Arc::new(42u64);
	store.set(&obj, "secret", true);
	drop(obj);

	let fresh: Vec<Arc<u64>> = (0..1024).map(Arc::new).collect();
	assert!(fresh.iter().all(|arc| !store.contains(arc)));

	assert_eq!(store.purge_stale(), 1);
	let after: Vec<Arc<u64>> = (0..1024).map(Arc::new).collect();
	assert!(after.iter().all(|arc| !store.contains(arc)));
	assert!(fresh.iter().all(|arc| !store.contains_key(arc, "secret")));
}

#[rstest]
fn arc_of_tracked_has_two_identities(store: MetadataStore) {
	let obj = Arc::new(Tracked::new(1));
	store.set(&*obj, "via", "handle");

	assert!(store.contains(&*obj));
	assert!(!store.contains(&obj));
	assert_eq!(store.get_as::<String>(&*obj, "via"), Ok(String::from("handle")));
}

#[rstest]
fn typed_reads(store: MetadataStore) {
	let obj = Tracked::new(());
	store.set(&obj, "size", 10);
	store.set(&obj, "name", "box");

	assert_eq!(store.get_as::<i64>(&obj, "size"), Ok(10));
	assert_eq!(store.get_as::<String>(&obj, "name"), Ok(String::from("box")));
	assert_eq!(
		store.get_as::<bool>(&obj, "size"),
		Err(MetadataError::TypeMismatch {
			key: MetaKey::from("size"),
			expected: crate::MetaType::Bool,
			got: crate::MetaType::Int,
		})
	);
}

#[rstest]
fn remove_and_remove_key(store: MetadataStore) {
	let obj = Tracked::new(());
	store.initialize(&obj, record! { "a" => 1, "b" => 2 });

	assert_eq!(store.remove_key(&obj, "a"), Ok(Some(MetaValue::Int(1))));
	assert_eq!(store.remove_key(&obj, "a"), Ok(None));
	assert!(store.contains_key(&obj, "b"));
	assert!(!store.contains_key(&obj, "a"));

	assert_eq!(store.remove(&obj), Some(record! { "b" => 2 }));
	assert_eq!(store.remove(&obj), None);
	assert!(!store.contains(&obj));
}

#[rstest]
fn update_returns_closure_result(store: MetadataStore) {
	let obj = Tracked::new(());
	let len = store.update(&obj, |record| {
		record.insert("a", 1);
		record.insert("b", 2);
		record.len()
	});
	assert_eq!(len, 2);
	assert_eq!(store.record(&obj).unwrap().len(), 2);
}

#[rstest]
fn identities_and_clear(store: MetadataStore) {
	let a = Tracked::new(());
	let b = Tracked::new(());
	store.set(&b, "k", 1);
	store.set(&a, "k", 1);

	assert_eq!(store.identities(), vec![a.token(), b.token()]);
	assert_eq!(store.clear(), 2);
	assert!(store.is_empty());
}

#[test]
fn capacity_config_is_kept() {
	let config = StoreConfig::default().with_initial_capacity(32);
	let store = MetadataStore::with_config(config.clone());
	assert_eq!(store.config(), &config);
	assert!(store.is_empty());
}

proptest! {
	#[test]
	fn last_write_wins(writes in prop::collection::vec((0usize..4, 0usize..8, any::<i64>()), 1..64)) {
		let store = MetadataStore::new();
		let objects: Vec<_> = (0..4).map(|_| Tracked::new(())).collect();
		let keys = ["a", "b", "c", "d", "e", "f", "g", "h"];
		let mut model: HashMap<(usize, usize), i64> = HashMap::new();

		for &(obj, key, value) in &writes {
			store.set(&objects[obj], keys[key], value);
			model.insert((obj, key), value);
		}

		for ((obj, key), value) in &model {
			prop_assert_eq!(store.get(&objects[*obj], keys[*key]), Ok(MetaValue::Int(*value)));
		}
		for (i, object) in objects.iter().enumerate() {
			let expected = model.keys().filter(|(obj, _)| *obj == i).count();
			if expected == 0 {
				prop_assert!(!store.contains(object));
			} else {
				prop_assert_eq!(store.record(object).map(|r| r.len()), Ok(expected));
			}
		}
	}
}
