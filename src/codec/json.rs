/* src/codec/json.rs */

use serde_json::Value;

use super::{FormatError, KEY_DELIMITER};
use crate::snapshot::Snapshot;

/// Flattens a nested JSON document into a snapshot.
///
/// Object-valued properties recurse with `parent:child` keys; everything
/// else (strings, numbers, booleans, arrays, null) is a leaf. Strings are
/// emitted raw, other leaves as their JSON text. An empty payload decodes
/// to an empty snapshot, not an error.
pub fn flatten_document(content: &[u8]) -> Result<Snapshot, FormatError> {
	if content.is_empty() {
		return Ok(Snapshot::new());
	}

	let document: Value = serde_json::from_slice(content)?;

	let root = match document {
		Value::Object(map) => map,
		_ => return Err(FormatError::RootNotObject),
	};

	let mut snapshot = Snapshot::new();
	for (name, value) in &root {
		collect_leaves(None, name, value, &mut snapshot);
	}

	Ok(snapshot)
}

fn collect_leaves(path: Option<&str>, name: &str, value: &Value, out: &mut Snapshot) {
	let key = match path {
		Some(path) => format!("{path}{KEY_DELIMITER}{name}"),
		None => name.to_owned(),
	};

	match value {
		Value::Object(children) => {
			for (child_name, child) in children {
				collect_leaves(Some(&key), child_name, child, out);
			}
		}
		_ => {
			out.insert(key, leaf_text(value));
		}
	}
}

fn leaf_text(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}
