use std::any::Any;
use std::num::TryFromIntError;
use std::sync::Arc;

use crate::record::MetadataRecord;


/// A metadata value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetaValue {
	/// Absence of a meaningful value.
	#[default]
	Nil,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
	/// Ordered list of values.
	List(Vec<MetaValue>),
	/// Nested record.
	Map(MetadataRecord),
	/// Any other shared value, compared by pointer.
	Opaque(OpaqueValue),
}

impl MetaValue {
	/// Wraps an arbitrary value as [`MetaValue::Opaque`].
	pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
		MetaValue::Opaque(OpaqueValue::new(value))
	}

	/// Returns true for [`MetaValue::Nil`].
	pub fn is_nil(&self) -> bool {
		matches!(self, MetaValue::Nil)
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			MetaValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			MetaValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			MetaValue::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			MetaValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the list if this is a `List` variant.
	pub fn as_list(&self) -> Option<&[MetaValue]> {
		match self {
			MetaValue::List(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the nested record if this is a `Map` variant.
	pub fn as_map(&self) -> Option<&MetadataRecord> {
		match self {
			MetaValue::Map(v) => Some(v),
			_ => None,
		}
	}

	/// Downcasts an `Opaque` value to `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			MetaValue::Opaque(v) => v.downcast_ref(),
			_ => None,
		}
	}

	/// Returns the type of this value.
	pub fn meta_type(&self) -> MetaType {
		match self {
			MetaValue::Nil => MetaType::Nil,
			MetaValue::Bool(_) => MetaType::Bool,
			MetaValue::Int(_) => MetaType::Int,
			MetaValue::Float(_) => MetaType::Float,
			MetaValue::String(_) => MetaType::String,
			MetaValue::List(_) => MetaType::List,
			MetaValue::Map(_) => MetaType::Map,
			MetaValue::Opaque(_) => MetaType::Opaque,
		}
	}
}

/// The type of a metadata value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaType {
	Nil,
	Bool,
	Int,
	Float,
	String,
	List,
	Map,
	Opaque,
}

impl MetaType {
	/// Returns the lowercase type name.
	pub const fn name(self) -> &'static str {
		match self {
			MetaType::Nil => "nil",
			MetaType::Bool => "bool",
			MetaType::Int => "int",
			MetaType::Float => "float",
			MetaType::String => "string",
			MetaType::List => "list",
			MetaType::Map => "map",
			MetaType::Opaque => "opaque",
		}
	}
}

impl core::fmt::Display for MetaType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

/// Shared value of any type, compared by pointer identity.
#[derive(Clone)]
pub struct OpaqueValue(Arc<dyn Any + Send + Sync>);

impl OpaqueValue {
	/// Wraps `value` in a new shared allocation.
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self(Arc::new(value))
	}

	/// Wraps an existing shared value without copying it.
	pub fn from_arc(value: Arc<dyn Any + Send + Sync>) -> Self {
		Self(value)
	}

	/// Downcasts to `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.0.downcast_ref::<T>()
	}

	/// Returns the shared value.
	pub fn as_arc(&self) -> &Arc<dyn Any + Send + Sync> {
		&self.0
	}
}

impl PartialEq for OpaqueValue {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
	}
}

impl core::fmt::Debug for OpaqueValue {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str("Opaque(..)")
	}
}

impl From<bool> for MetaValue {
	fn from(v: bool) -> Self {
		MetaValue::Bool(v)
	}
}

impl From<i64> for MetaValue {
	fn from(v: i64) -> Self {
		MetaValue::Int(v)
	}
}

impl From<i32> for MetaValue {
	fn from(v: i32) -> Self {
		MetaValue::Int(v.into())
	}
}

impl From<u32> for MetaValue {
	fn from(v: u32) -> Self {
		MetaValue::Int(v.into())
	}
}

impl From<i16> for MetaValue {
	fn from(v: i16) -> Self {
		MetaValue::Int(v.into())
	}
}

impl From<u16> for MetaValue {
	fn from(v: u16) -> Self {
		MetaValue::Int(v.into())
	}
}

impl From<u8> for MetaValue {
	fn from(v: u8) -> Self {
		MetaValue::Int(v.into())
	}
}

// Unsigned sizes can exceed `i64`; convert with `MetaValue::try_from(v.len())?`.
impl TryFrom<u64> for MetaValue {
	type Error = TryFromIntError;

	fn try_from(v: u64) -> Result<Self, Self::Error> {
		i64::try_from(v).map(MetaValue::Int)
	}
}

impl TryFrom<usize> for MetaValue {
	type Error = TryFromIntError;

	fn try_from(v: usize) -> Result<Self, Self::Error> {
		i64::try_from(v).map(MetaValue::Int)
	}
}

impl From<f32> for MetaValue {
	fn from(v: f32) -> Self {
		MetaValue::Float(v.into())
	}
}

impl From<f64> for MetaValue {
	fn from(v: f64) -> Self {
		MetaValue::Float(v)
	}
}

impl From<String> for MetaValue {
	fn from(v: String) -> Self {
		MetaValue::String(v)
	}
}

impl From<&str> for MetaValue {
	fn from(v: &str) -> Self {
		MetaValue::String(v.to_string())
	}
}

impl From<Vec<MetaValue>> for MetaValue {
	fn from(v: Vec<MetaValue>) -> Self {
		MetaValue::List(v)
	}
}

impl From<MetadataRecord> for MetaValue {
	fn from(v: MetadataRecord) -> Self {
		MetaValue::Map(v)
	}
}

impl From<OpaqueValue> for MetaValue {
	fn from(v: OpaqueValue) -> Self {
		MetaValue::Opaque(v)
	}
}

// Seal the FromMetaValue trait to prevent external implementations.
mod sealed {
	pub trait Sealed {}
	impl Sealed for bool {}
	impl Sealed for i64 {}
	impl Sealed for f64 {}
	impl Sealed for String {}
	impl Sealed for Vec<super::MetaValue> {}
	impl Sealed for crate::record::MetadataRecord {}
}

/// Trait for types that can be extracted from a [`MetaValue`].
pub trait FromMetaValue: sealed::Sealed + Sized {
	/// Extracts the value, returning `None` if the type doesn't match.
	fn from_meta(value: &MetaValue) -> Option<Self>;

	/// Returns the `MetaType` corresponding to this Rust type.
	fn meta_type() -> MetaType;
}

impl FromMetaValue for bool {
	fn from_meta(value: &MetaValue) -> Option<Self> {
		value.as_bool()
	}

	fn meta_type() -> MetaType {
		MetaType::Bool
	}
}

impl FromMetaValue for i64 {
	fn from_meta(value: &MetaValue) -> Option<Self> {
		value.as_int()
	}

	fn meta_type() -> MetaType {
		MetaType::Int
	}
}

impl FromMetaValue for f64 {
	fn from_meta(value: &MetaValue) -> Option<Self> {
		value.as_float()
	}

	fn meta_type() -> MetaType {
		MetaType::Float
	}
}

impl FromMetaValue for String {
	fn from_meta(value: &MetaValue) -> Option<Self> {
		value.as_str().map(|s| s.to_string())
	}

	fn meta_type() -> MetaType {
		MetaType::String
	}
}

impl FromMetaValue for Vec<MetaValue> {
	fn from_meta(value: &MetaValue) -> Option<Self> {
		value.as_list().map(<[MetaValue]>::to_vec)
	}

	fn meta_type() -> MetaType {
		MetaType::List
	}
}

impl FromMetaValue for MetadataRecord {
	fn from_meta(value: &MetaValue) -> Option<Self> {
		value.as_map().cloned()
	}

	fn meta_type() -> MetaType {
		MetaType::Map
	}
}
