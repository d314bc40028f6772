//! Call-site shorthands scoped to the invoking module.
//!
//! Both macros resolve the store through
//! [`MetadataRegistry::scope`](crate::MetadataRegistry::scope) with the
//! caller's `module_path!()`, so metadata written from one module is not
//! visible from another. The object is passed by place and borrowed.

/// Reads metadata for an object from the caller's module scope.
///
/// - `metadata!(registry, x)` returns the full record.
/// - `metadata!(registry, x, key)` returns the value at `key`.
///
/// ```
/// use gmeta_identity::Tracked;
/// use gmeta_store::{MetaValue, MetadataRegistry, metadata, set_metadata};
///
/// let registry = MetadataRegistry::new();
/// let obj = Tracked::new(1);
/// set_metadata!(registry, obj, "color", "red");
/// assert_eq!(metadata!(registry, obj, "color").unwrap(), MetaValue::from("red"));
/// assert_eq!(metadata!(registry, obj).unwrap().len(), 1);
/// ```
#[macro_export]
macro_rules! metadata {
	($registry:expr, $object:expr $(,)?) => {
		$registry.scope(::core::module_path!()).record(&$object)
	};
	($registry:expr, $object:expr, $key:expr $(,)?) => {
		$registry.scope(::core::module_path!()).get(&$object, $key)
	};
}

/// Writes metadata for an object in the caller's module scope.
///
/// - `set_metadata!(registry, x)` initializes an empty record.
/// - `set_metadata!(registry, x, data)` initializes the record to `data`.
/// - `set_metadata!(registry, x, key, value)` sets one key.
#[macro_export]
macro_rules! set_metadata {
	($registry:expr, $object:expr $(,)?) => {
		$registry.scope(::core::module_path!()).initialize_empty(&$object)
	};
	($registry:expr, $object:expr, $data:expr $(,)?) => {
		$registry.scope(::core::module_path!()).initialize(&$object, $data)
	};
	($registry:expr, $object:expr, $key:expr, $value:expr $(,)?) => {
		$registry.scope(::core::module_path!()).set(&$object, $key, $value)
	};
}
