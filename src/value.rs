//! Format-neutral value tree shared by every transcoding direction.
//!
//! [`Value`] is the pivot between the caller-facing bridge containers and the JSON document
//! handed to the identity library. Numbers are always `f64`; mappings keep insertion order and
//! never hold duplicate keys.

// crates.io
use indexmap::{
	IndexMap,
	map::{IntoIter, Iter},
};
// self
use crate::_prelude::*;

/// Type tag describing which variant a [`Value`] holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
	/// [`Value::Null`].
	Null,
	/// [`Value::Boolean`].
	Boolean,
	/// [`Value::Number`].
	Number,
	/// [`Value::String`].
	String,
	/// [`Value::Sequence`].
	Sequence,
	/// [`Value::Mapping`].
	Mapping,
}
impl ValueKind {
	/// Returns a stable label suitable for error messages and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ValueKind::Null => "null",
			ValueKind::Boolean => "boolean",
			ValueKind::Number => "number",
			ValueKind::String => "string",
			ValueKind::Sequence => "sequence",
			ValueKind::Mapping => "mapping",
		}
	}
}
impl Display for ValueKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Recursive value tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
	/// Explicit null.
	#[default]
	Null,
	/// Boolean scalar.
	Boolean(bool),
	/// Numeric scalar; integers and floats share this representation.
	Number(f64),
	/// Text scalar.
	String(String),
	/// Ordered list of values.
	Sequence(Vec<Value>),
	/// Key-unique, insertion-ordered mapping.
	Mapping(Mapping),
}
impl Value {
	/// Returns the variant tag.
	pub const fn kind(&self) -> ValueKind {
		match self {
			Value::Null => ValueKind::Null,
			Value::Boolean(_) => ValueKind::Boolean,
			Value::Number(_) => ValueKind::Number,
			Value::String(_) => ValueKind::String,
			Value::Sequence(_) => ValueKind::Sequence,
			Value::Mapping(_) => ValueKind::Mapping,
		}
	}

	/// Returns true for [`Value::Null`].
	pub const fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns the boolean payload, if any.
	pub const fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns the numeric payload, if any.
	pub const fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the text payload, if any.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the sequence payload, if any.
	pub fn as_sequence(&self) -> Option<&[Value]> {
		match self {
			Value::Sequence(items) => Some(items),
			_ => None,
		}
	}

	/// Returns the mapping payload, if any.
	pub fn as_mapping(&self) -> Option<&Mapping> {
		match self {
			Value::Mapping(map) => Some(map),
			_ => None,
		}
	}
}
impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Boolean(value)
	}
}
impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Number(value)
	}
}
impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Number(value.into())
	}
}
impl From<u32> for Value {
	fn from(value: u32) -> Self {
		Value::Number(value.into())
	}
}
impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Number(value as f64)
	}
}
impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}
impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}
impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Value::Sequence(value)
	}
}
impl From<Mapping> for Value {
	fn from(value: Mapping) -> Self {
		Value::Mapping(value)
	}
}
impl<T> From<Option<T>> for Value
where
	T: Into<Value>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}
impl FromIterator<Value> for Value {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Value::Sequence(iter.into_iter().collect())
	}
}

/// Insertion-ordered mapping with unique string keys.
///
/// Re-inserting an existing key replaces its value in place, so the original position is kept
/// and the uniqueness invariant holds no matter how the mapping is built. Equality compares
/// entries in order.
#[derive(Clone, Debug, Default)]
pub struct Mapping {
	entries: IndexMap<String, Value>,
}
impl Mapping {
	/// Creates an empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty mapping with room for `capacity` entries.
	pub fn with_capacity(capacity: usize) -> Self {
		Self { entries: IndexMap::with_capacity(capacity) }
	}

	/// Inserts or replaces an entry, returning the previous value for `key`.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.entries.insert(key.into(), value.into())
	}

	/// Looks up the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Returns true when `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true when the mapping holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Entries in insertion order.
	pub fn iter(&self) -> MappingIter<'_> {
		MappingIter { inner: self.entries.iter() }
	}
}
impl PartialEq for Mapping {
	fn eq(&self, other: &Self) -> bool {
		self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
	}
}
impl<K, V> FromIterator<(K, V)> for Mapping
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut mapping = Mapping::new();

		for (key, value) in iter {
			mapping.insert(key, value);
		}

		mapping
	}
}
impl IntoIterator for Mapping {
	type IntoIter = IntoIter<String, Value>;
	type Item = (String, Value);

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}
impl<'a> IntoIterator for &'a Mapping {
	type IntoIter = MappingIter<'a>;
	type Item = (&'a str, &'a Value);

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Borrowing iterator over mapping entries.
#[derive(Clone, Debug)]
pub struct MappingIter<'a> {
	inner: Iter<'a, String, Value>,
}
impl<'a> Iterator for MappingIter<'a> {
	type Item = (&'a str, &'a Value);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|(key, value)| (key.as_str(), value))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn mapping_replaces_duplicates_in_place() {
		let mut mapping = Mapping::new();

		assert!(mapping.insert("a", 1).is_none());
		assert!(mapping.insert("b", true).is_none());
		assert_eq!(mapping.insert("a", "again"), Some(Value::Number(1.0)));
		assert_eq!(mapping.len(), 2);
		assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["a", "b"]);
		assert_eq!(mapping.get("a").and_then(Value::as_str), Some("again"));
	}

	#[test]
	fn mapping_from_iter_keeps_first_position() {
		let mapping: Mapping = [("x", 1), ("y", 2), ("x", 3)].into_iter().collect();

		assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["x", "y"]);
		assert_eq!(mapping.get("x"), Some(&Value::Number(3.0)));
	}

	#[test]
	fn mapping_equality_respects_order() {
		let forward: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
		let reverse: Mapping = [("b", 2), ("a", 1)].into_iter().collect();

		assert_ne!(forward, reverse);
		assert_eq!(forward, forward.clone());
	}

	#[test]
	fn large_mapping_keeps_order_and_uniqueness() {
		let mut mapping = Mapping::with_capacity(10_000);

		for i in 0..10_000 {
			mapping.insert(format!("k{i}"), i);
		}
		for i in (0..10_000).step_by(2) {
			mapping.insert(format!("k{i}"), Value::Null);
		}

		assert_eq!(mapping.len(), 10_000);
		assert_eq!(mapping.keys().next(), Some("k0"));
		assert_eq!(mapping.keys().last(), Some("k9999"));
		assert_eq!(mapping.get("k2"), Some(&Value::Null));
		assert_eq!(mapping.get("k3"), Some(&Value::Number(3.0)));
	}

	#[test]
	fn integers_and_floats_share_number() {
		assert_eq!(Value::from(2_i64), Value::from(2.0_f64));
		assert_eq!(Value::from(None::<&str>), Value::Null);
		assert_eq!(Value::from(Some("x")).kind(), ValueKind::String);
	}
}
