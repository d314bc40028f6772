use std::sync::Arc;

use gmeta_identity::Tracked;

use super::*;
use crate::config::{MissingIdentity, StoreConfig};
use crate::{MetaValue, MetadataError, record};

#[test]
fn scope_is_created_once() {
	let registry = MetadataRegistry::new();
	let a = registry.scope("app::ui");
	let b = registry.scope("app::ui");
	assert!(Arc::ptr_eq(&a, &b));
	assert_eq!(registry.scopes(), vec!["app::ui"]);
}

#[test]
fn scopes_are_isolated() {
	let registry = MetadataRegistry::new();
	let obj = Tracked::new(());

	registry.scope("a").set(&obj, "k", 1);
	registry.scope("b").set(&obj, "k", 2);

	assert_eq!(registry.scope("a").get(&obj, "k"), Ok(MetaValue::Int(1)));
	assert_eq!(registry.scope("b").get(&obj, "k"), Ok(MetaValue::Int(2)));
	assert_eq!(
		registry.scope("c").record(&obj),
		Err(MetadataError::IdentityNotFound(obj.token()))
	);
	assert_eq!(registry.scopes(), vec!["a", "b", "c"]);
}

#[test]
fn get_scope_does_not_create() {
	let registry = MetadataRegistry::new();
	assert!(registry.get_scope("x").is_none());
	assert!(registry.scopes().is_empty());
}

#[test]
fn config_applies_to_scopes() {
	let config = RegistryConfig {
		store: StoreConfig::default().with_missing_identity(MissingIdentity::Empty),
	};
	let registry = MetadataRegistry::with_config(config);
	let obj = Tracked::new(());

	assert_eq!(registry.scope("m").record(&obj), Ok(record! {}));
	assert_eq!(
		registry.config().store.missing_identity,
		MissingIdentity::Empty
	);
}

#[test]
fn removed_scope_detaches() {
	let registry = MetadataRegistry::new();
	let obj = Tracked::new(());
	let held = registry.scope("m");
	held.set(&obj, "k", true);

	let removed = registry.remove_scope("m").unwrap();
	assert!(Arc::ptr_eq(&held, &removed));
	assert!(registry.remove_scope("m").is_none());

	assert!(!registry.scope("m").contains(&obj));
	assert!(held.contains(&obj));
}

#[test]
fn purge_covers_all_scopes() {
	let registry = MetadataRegistry::new();
	let a = Arc::new(1u8);
	let b = Tracked::new(2u8);
	registry.scope("x").set(&a, "k", 1);
	registry.scope("y").set(&b, "k", 1);
	registry.scope("y").set(&Tracked::new(3u8), "k", 1);

	drop(a);
	drop(b);
	assert_eq!(registry.purge_stale(), 3);
	assert!(registry.scope("x").is_empty());
	assert!(registry.scope("y").is_empty());
}
