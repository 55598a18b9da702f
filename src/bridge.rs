//! Caller-facing bridge containers.
//!
//! Hosts hand the bridge keyed maps and indexed arrays whose entries carry a dynamic
//! [`ReadableType`] tag. [`BridgeMap`] and [`BridgeArray`] model those containers with the
//! familiar `put_*`/`push_*`/`get_*` surface so glue code can fill and read them without
//! touching the [`Value`](crate::value::Value) tree directly.

// std
use std::slice::Iter;
// crates.io
use indexmap::IndexMap;
// self
use crate::{_prelude::*, transcode};

/// Dynamic type tag carried by every bridge entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReadableType {
	/// Null entry.
	Null,
	/// Boolean entry.
	Boolean,
	/// Numeric entry (always double precision).
	Number,
	/// Text entry.
	String,
	/// Nested keyed container.
	Map,
	/// Nested indexed container.
	Array,
}
impl ReadableType {
	/// Returns a stable label suitable for error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			ReadableType::Null => "null",
			ReadableType::Boolean => "a boolean",
			ReadableType::Number => "a number",
			ReadableType::String => "a string",
			ReadableType::Map => "a map",
			ReadableType::Array => "an array",
		}
	}
}
impl Display for ReadableType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Single tagged entry inside a bridge container.
#[derive(Clone, Debug, PartialEq)]
pub enum BridgeValue {
	/// Null entry.
	Null,
	/// Boolean entry.
	Boolean(bool),
	/// Numeric entry.
	Number(f64),
	/// Text entry.
	String(String),
	/// Nested keyed container.
	Map(BridgeMap),
	/// Nested indexed container.
	Array(BridgeArray),
}
impl BridgeValue {
	/// Returns the dynamic type tag of this entry.
	pub const fn get_type(&self) -> ReadableType {
		match self {
			BridgeValue::Null => ReadableType::Null,
			BridgeValue::Boolean(_) => ReadableType::Boolean,
			BridgeValue::Number(_) => ReadableType::Number,
			BridgeValue::String(_) => ReadableType::String,
			BridgeValue::Map(_) => ReadableType::Map,
			BridgeValue::Array(_) => ReadableType::Array,
		}
	}

	/// Returns the text payload, if any.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			BridgeValue::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the boolean payload, if any.
	pub const fn as_bool(&self) -> Option<bool> {
		match self {
			BridgeValue::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns the numeric payload, if any.
	pub const fn as_f64(&self) -> Option<f64> {
		match self {
			BridgeValue::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the nested map, if any.
	pub fn as_map(&self) -> Option<&BridgeMap> {
		match self {
			BridgeValue::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Returns the nested array, if any.
	pub fn as_array(&self) -> Option<&BridgeArray> {
		match self {
			BridgeValue::Array(array) => Some(array),
			_ => None,
		}
	}
}
impl Display for BridgeValue {
	/// Renders scalars as plain text and containers as compact JSON.
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			BridgeValue::Null => f.write_str("null"),
			BridgeValue::Boolean(b) => write!(f, "{b}"),
			BridgeValue::Number(n) => write!(f, "{n}"),
			BridgeValue::String(s) => f.write_str(s),
			BridgeValue::Map(_) | BridgeValue::Array(_) => match transcode::bridge_to_document(self)
			{
				Some(document) => write!(f, "{document}"),
				None => f.write_str("null"),
			},
		}
	}
}

/// Keyed bridge container; keys are unique and keep insertion order.
#[derive(Clone, Debug, Default)]
pub struct BridgeMap {
	entries: IndexMap<String, BridgeValue>,
}
impl BridgeMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true when `key` is present (including null entries).
	pub fn has_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Returns the entry stored under `key`.
	pub fn get(&self, key: &str) -> Option<&BridgeValue> {
		self.entries.get(key)
	}

	/// Returns the type tag of the entry stored under `key`.
	pub fn get_type(&self, key: &str) -> Option<ReadableType> {
		self.get(key).map(BridgeValue::get_type)
	}

	/// Returns the boolean stored under `key`, if the entry is a boolean.
	pub fn get_boolean(&self, key: &str) -> Option<bool> {
		self.get(key)?.as_bool()
	}

	/// Returns the number stored under `key`, if the entry is a number.
	pub fn get_double(&self, key: &str) -> Option<f64> {
		self.get(key)?.as_f64()
	}

	/// Returns the text stored under `key`, if the entry is a string.
	pub fn get_string(&self, key: &str) -> Option<&str> {
		self.get(key)?.as_str()
	}

	/// Returns the nested map stored under `key`, if the entry is a map.
	pub fn get_map(&self, key: &str) -> Option<&BridgeMap> {
		self.get(key)?.as_map()
	}

	/// Returns the nested array stored under `key`, if the entry is an array.
	pub fn get_array(&self, key: &str) -> Option<&BridgeArray> {
		self.get(key)?.as_array()
	}

	/// Reads an optional entry through `extract`, treating absent and null entries as `None`.
	///
	/// Returns the entry's actual tag as the error when it exists with a shape `extract`
	/// rejects.
	pub fn get_optional<'a, T>(
		&'a self,
		key: &str,
		extract: impl FnOnce(&'a BridgeValue) -> Option<T>,
	) -> Result<Option<T>, ReadableType> {
		match self.get(key) {
			None | Some(BridgeValue::Null) => Ok(None),
			Some(value) => extract(value).map(Some).ok_or(value.get_type()),
		}
	}

	/// Inserts or replaces an entry; replacements keep the original position.
	pub fn put(&mut self, key: impl Into<String>, value: BridgeValue) {
		self.entries.insert(key.into(), value);
	}

	/// Stores a null entry.
	pub fn put_null(&mut self, key: impl Into<String>) {
		self.put(key, BridgeValue::Null);
	}

	/// Stores a boolean entry.
	pub fn put_boolean(&mut self, key: impl Into<String>, value: bool) {
		self.put(key, BridgeValue::Boolean(value));
	}

	/// Stores a numeric entry.
	pub fn put_double(&mut self, key: impl Into<String>, value: f64) {
		self.put(key, BridgeValue::Number(value));
	}

	/// Stores an integer entry; the bridge keeps it as a double.
	pub fn put_int(&mut self, key: impl Into<String>, value: i32) {
		self.put(key, BridgeValue::Number(value.into()));
	}

	/// Stores a text entry.
	pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.put(key, BridgeValue::String(value.into()));
	}

	/// Stores a text entry, or null when `value` is absent.
	pub fn put_optional_string(&mut self, key: impl Into<String>, value: Option<&str>) {
		match value {
			Some(value) => self.put_string(key, value),
			None => self.put_null(key),
		}
	}

	/// Stores a nested map.
	pub fn put_map(&mut self, key: impl Into<String>, value: BridgeMap) {
		self.put(key, BridgeValue::Map(value));
	}

	/// Stores a nested array.
	pub fn put_array(&mut self, key: impl Into<String>, value: BridgeArray) {
		self.put(key, BridgeValue::Array(value));
	}

	/// Keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &BridgeValue)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true when the map holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
impl PartialEq for BridgeMap {
	fn eq(&self, other: &Self) -> bool {
		self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
	}
}

/// Indexed bridge container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BridgeArray {
	items: Vec<BridgeValue>,
}
impl BridgeArray {
	/// Creates an empty array.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the entry at `index`.
	pub fn get(&self, index: usize) -> Option<&BridgeValue> {
		self.items.get(index)
	}

	/// Returns the type tag of the entry at `index`.
	pub fn get_type(&self, index: usize) -> Option<ReadableType> {
		self.items.get(index).map(BridgeValue::get_type)
	}

	/// Appends an entry.
	pub fn push(&mut self, value: BridgeValue) {
		self.items.push(value);
	}

	/// Appends a null entry.
	pub fn push_null(&mut self) {
		self.push(BridgeValue::Null);
	}

	/// Appends a boolean entry.
	pub fn push_boolean(&mut self, value: bool) {
		self.push(BridgeValue::Boolean(value));
	}

	/// Appends a numeric entry.
	pub fn push_double(&mut self, value: f64) {
		self.push(BridgeValue::Number(value));
	}

	/// Appends an integer entry; the bridge keeps it as a double.
	pub fn push_int(&mut self, value: i32) {
		self.push(BridgeValue::Number(value.into()));
	}

	/// Appends a text entry.
	pub fn push_string(&mut self, value: impl Into<String>) {
		self.push(BridgeValue::String(value.into()));
	}

	/// Appends a nested map.
	pub fn push_map(&mut self, value: BridgeMap) {
		self.push(BridgeValue::Map(value));
	}

	/// Appends a nested array.
	pub fn push_array(&mut self, value: BridgeArray) {
		self.push(BridgeValue::Array(value));
	}

	/// Entries in index order.
	pub fn iter(&self) -> Iter<'_, BridgeValue> {
		self.items.iter()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns true when the array holds no entries.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Renders every entry as text, the way host-side string lists are read.
	pub fn to_string_list(&self) -> Vec<String> {
		self.items.iter().map(ToString::to_string).collect()
	}
}
impl FromIterator<BridgeValue> for BridgeArray {
	fn from_iter<I: IntoIterator<Item = BridgeValue>>(iter: I) -> Self {
		Self { items: iter.into_iter().collect() }
	}
}
impl<'a> IntoIterator for &'a BridgeArray {
	type IntoIter = Iter<'a, BridgeValue>;
	type Item = &'a BridgeValue;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}
