//! Shape-preserving conversions between bridge containers, [`Value`] trees, and JSON documents.
//!
//! Every conversion is a stateless pre-order walk that builds a fresh tree:
//!
//! - bridge ⇄ [`Value`] is lossless in both directions;
//! - [`Value`] ⇄ JSON document keeps order and keys, but drops any value the target cannot hold
//!   (a non-finite number has no JSON form). Dropped entries vanish from the enclosing mapping
//!   or sequence; they are never replaced with null and never raise an error.
//!
//! Numbers travel as `f64` throughout, so `1` and `1.0` are indistinguishable after a trip.

// crates.io
use serde_json::{Map as JsonMap, Number as JsonNumber};
// self
use crate::{
	_prelude::*,
	bridge::{BridgeArray, BridgeMap, BridgeValue},
	value::{Mapping, Value},
};

/// Converts a bridge entry into a value tree.
pub fn from_bridge(value: &BridgeValue) -> Value {
	match value {
		BridgeValue::Null => Value::Null,
		BridgeValue::Boolean(b) => Value::Boolean(*b),
		BridgeValue::Number(n) => Value::Number(*n),
		BridgeValue::String(s) => Value::String(s.clone()),
		BridgeValue::Map(map) => Value::Mapping(from_bridge_map(map)),
		BridgeValue::Array(array) => Value::Sequence(from_bridge_array(array)),
	}
}

/// Converts a keyed bridge container into a mapping, preserving key order.
pub fn from_bridge_map(map: &BridgeMap) -> Mapping {
	let mut mapping = Mapping::with_capacity(map.len());

	for (key, value) in map.iter() {
		mapping.insert(key, from_bridge(value));
	}

	mapping
}

/// Converts an indexed bridge container into a sequence.
pub fn from_bridge_array(array: &BridgeArray) -> Vec<Value> {
	array.iter().map(from_bridge).collect()
}

/// Converts a value tree into a bridge entry.
pub fn to_bridge(value: &Value) -> BridgeValue {
	match value {
		Value::Null => BridgeValue::Null,
		Value::Boolean(b) => BridgeValue::Boolean(*b),
		Value::Number(n) => BridgeValue::Number(*n),
		Value::String(s) => BridgeValue::String(s.clone()),
		Value::Sequence(items) => BridgeValue::Array(to_bridge_array(items)),
		Value::Mapping(mapping) => BridgeValue::Map(to_bridge_map(mapping)),
	}
}

/// Converts a mapping into a keyed bridge container.
pub fn to_bridge_map(mapping: &Mapping) -> BridgeMap {
	let mut map = BridgeMap::new();

	for (key, value) in mapping {
		map.put(key, to_bridge(value));
	}

	map
}

/// Converts a sequence into an indexed bridge container.
pub fn to_bridge_array(items: &[Value]) -> BridgeArray {
	items.iter().map(to_bridge).collect()
}

/// Converts a value tree into a JSON document node.
///
/// Returns `None` when the value itself has no JSON form; nested unsupported values are
/// omitted from their parent instead.
pub fn to_document(value: &Value) -> Option<JsonValue> {
	let node = match value {
		Value::Null => JsonValue::Null,
		Value::Boolean(b) => JsonValue::Bool(*b),
		Value::Number(n) => match JsonNumber::from_f64(*n) {
			Some(number) => JsonValue::Number(number),
			None => {
				#[cfg(feature = "tracing")]
				tracing::trace!(number = *n, "dropping number without a JSON form");

				return None;
			},
		},
		Value::String(s) => JsonValue::String(s.clone()),
		Value::Sequence(items) => JsonValue::Array(items.iter().filter_map(to_document).collect()),
		Value::Mapping(mapping) => JsonValue::Object(to_document_object(mapping)),
	};

	Some(node)
}

/// Converts a mapping into a JSON object, omitting entries without a JSON form.
pub fn to_document_object(mapping: &Mapping) -> JsonMap<String, JsonValue> {
	let mut object = JsonMap::with_capacity(mapping.len());

	for (key, value) in mapping {
		if let Some(node) = to_document(value) {
			object.insert(key.to_owned(), node);
		}
	}

	object
}

/// Converts a JSON document node into a value tree.
///
/// Returns `None` for numbers that cannot be read as `f64`; nested ones are omitted from
/// their parent instead.
pub fn from_document(node: &JsonValue) -> Option<Value> {
	let value = match node {
		JsonValue::Null => Value::Null,
		JsonValue::Bool(b) => Value::Boolean(*b),
		JsonValue::Number(n) => Value::Number(n.as_f64()?),
		JsonValue::String(s) => Value::String(s.clone()),
		JsonValue::Array(items) => Value::Sequence(items.iter().filter_map(from_document).collect()),
		JsonValue::Object(object) => Value::Mapping(from_document_object(object)),
	};

	Some(value)
}

/// Converts a JSON object into a mapping, preserving document key order.
pub fn from_document_object(object: &JsonMap<String, JsonValue>) -> Mapping {
	let mut mapping = Mapping::with_capacity(object.len());

	for (key, node) in object {
		if let Some(value) = from_document(node) {
			mapping.insert(key.as_str(), value);
		}
	}

	mapping
}

/// Converts caller-supplied bridge data straight into a JSON document node.
pub fn bridge_to_document(value: &BridgeValue) -> Option<JsonValue> {
	to_document(&from_bridge(value))
}

/// Converts a keyed bridge container straight into a JSON object.
pub fn bridge_map_to_document(map: &BridgeMap) -> JsonMap<String, JsonValue> {
	to_document_object(&from_bridge_map(map))
}

/// Converts a JSON result payload (claims, extension fields) into a bridge entry.
pub fn document_to_bridge(node: &JsonValue) -> Option<BridgeValue> {
	from_document(node).map(|value| to_bridge(&value))
}

/// Converts a JSON object payload into a keyed bridge container.
pub fn document_object_to_bridge(object: &JsonMap<String, JsonValue>) -> BridgeMap {
	to_bridge_map(&from_document_object(object))
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn sample_tree() -> Value {
		let mut inner = Mapping::new();

		inner.insert("flag", true);
		inner.insert("nothing", Value::Null);

		let mut root = Mapping::new();

		root.insert("zeta", "last-alphabetically-first-inserted");
		root.insert("alpha", 0.25);
		root.insert("list", vec![Value::from(1), Value::from("two"), Value::Mapping(inner)]);

		Value::Mapping(root)
	}

	#[test]
	fn bridge_round_trip_is_structural_identity() {
		let tree = sample_tree();

		assert_eq!(from_bridge(&to_bridge(&tree)), tree);
	}

	#[test]
	fn document_preserves_key_order() {
		let document = to_document(&sample_tree()).expect("Sample tree should have a JSON form.");
		let keys = document
			.as_object()
			.expect("Mapping should render as an object.")
			.keys()
			.cloned()
			.collect::<Vec<_>>();

		assert_eq!(keys, vec!["zeta", "alpha", "list"]);
	}

	#[test]
	fn non_finite_numbers_are_omitted_not_nulled() {
		let mut mapping = Mapping::new();

		mapping.insert("kept", 1);
		mapping.insert("nan", f64::NAN);
		mapping.insert("inf", vec![Value::from(f64::INFINITY), Value::from(2)]);

		let object = to_document_object(&mapping);

		assert!(!object.contains_key("nan"));
		assert_eq!(object.get("kept"), Some(&json!(1.0)));
		assert_eq!(object.get("inf"), Some(&json!([2.0])));
		assert!(to_document(&Value::Number(f64::NEG_INFINITY)).is_none());
	}

	#[test]
	fn integers_become_doubles_through_documents() {
		let value = from_document(&json!({ "exp": 1_700_000_000, "ratio": 1.0 }))
			.expect("Object should convert.");
		let mapping = value.as_mapping().expect("Object should convert into a mapping.");

		assert_eq!(mapping.get("exp"), Some(&Value::Number(1_700_000_000.0)));
		assert_eq!(mapping.get("ratio"), Some(&Value::Number(1.0)));
	}

	#[test]
	fn claims_reach_the_bridge_in_document_order() {
		let claims = json!({
			"oid": "object-id",
			"roles": ["Reader", "Writer"],
			"email_verified": true,
			"nested": { "amr": ["pwd"] },
			"nbf": null
		});
		let bridge = document_object_to_bridge(claims.as_object().expect("Claims are an object."));

		assert_eq!(bridge.keys().collect::<Vec<_>>(), vec![
			"oid",
			"roles",
			"email_verified",
			"nested",
			"nbf"
		]);
		assert_eq!(bridge.get_boolean("email_verified"), Some(true));
		assert_eq!(bridge.get_array("roles").map(BridgeArray::len), Some(2));
		assert!(matches!(bridge.get("nbf"), Some(BridgeValue::Null)));
	}
}
