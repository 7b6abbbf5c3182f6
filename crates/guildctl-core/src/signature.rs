//! Order independent record fingerprint, used to detect drift between callers.

use serde_json::Value;

use guildctl_types::hasher::Hasher;

use crate::prelude::*;
use crate::record::ConfigRecord;

/// Canonical JSON text: object keys sorted at every level, arrays in order.
pub fn canonicalize(value: &Value) -> String {
	let mut out = String::new();
	write_canonical(value, &mut out);
	out
}

fn write_canonical(value: &Value, out: &mut String) {
	match value {
		Value::Object(map) => {
			let mut entries: Vec<(&String, &Value)> = map.iter().collect();
			entries.sort_by(|a, b| a.0.cmp(b.0));

			out.push('{');
			for (i, (key, val)) in entries.into_iter().enumerate() {
				if i > 0 {
					out.push(',');
				}
				out.push_str(&Value::String(key.clone()).to_string());
				out.push(':');
				write_canonical(val, out);
			}
			out.push('}');
		}
		Value::Array(items) => {
			out.push('[');
			for (i, item) in items.iter().enumerate() {
				if i > 0 {
					out.push(',');
				}
				write_canonical(item, out);
			}
			out.push(']');
		}
		primitive => out.push_str(&primitive.to_string()),
	}
}

pub fn signature_of_value(value: &Value) -> Box<str> {
	let mut hasher = Hasher::new();
	hasher.update(canonicalize(value).as_bytes());
	hasher.finalize("s").into()
}

/// Signature of a sanitized record
pub fn signature(record: &ConfigRecord) -> ClResult<Box<str>> {
	Ok(signature_of_value(&record.to_value()?))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_canonical_key_order() {
		let a: Value = serde_json::from_str(r#"{"b":1,"a":{"y":[3,1],"x":null}}"#).unwrap();
		let b: Value = serde_json::from_str(r#"{"a":{"x":null,"y":[3,1]},"b":1}"#).unwrap();
		assert_eq!(canonicalize(&a), r#"{"a":{"x":null,"y":[3,1]},"b":1}"#);
		assert_eq!(signature_of_value(&a), signature_of_value(&b));
	}

	#[test]
	fn test_array_order_matters() {
		assert_ne!(signature_of_value(&json!([1, 2])), signature_of_value(&json!([2, 1])));
	}

	#[test]
	fn test_string_escaping() {
		let value = json!({ "k\"ey": "line\nbreak" });
		assert_eq!(canonicalize(&value), r#"{"k\"ey":"line\nbreak"}"#);
	}

	#[test]
	fn test_signature_format() {
		let sig = signature_of_value(&json!({}));
		assert!(sig.starts_with("s1~"));
	}

	#[test]
	fn test_reparse_stable() {
		let value = json!({ "z": [true, 1.5, "x"], "a": { "n": -3 } });
		let text = serde_json::to_string(&value).unwrap();
		let reparsed: Value = serde_json::from_str(&text).unwrap();
		assert_eq!(signature_of_value(&value), signature_of_value(&reparsed));
	}
}

// vim: ts=4
