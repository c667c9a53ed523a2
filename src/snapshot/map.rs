/* src/snapshot/map.rs */

use std::collections::HashMap;

/// An immutable flat mapping from hierarchical key to string value.
///
/// Keys are segments joined by the `:` delimiter. A snapshot is produced
/// fresh on every successful fetch and replaced wholesale; it is never
/// mutated in place once published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot(HashMap<String, String>);

impl Snapshot {
	/// Creates an empty snapshot.
	pub fn new() -> Self {
		Self(HashMap::new())
	}

	/// Gets a value by its hierarchical key.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the snapshot has no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns all keys in the snapshot.
	pub fn keys(&self) -> Vec<String> {
		self.0.keys().cloned().collect()
	}

	/// Iterates over all key-value pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Compares two snapshots by full content equality.
	///
	/// Key-set and value equality, order-independent. Two snapshots built
	/// from the same pairs in different insertion order are equal.
	pub fn content_equals(&self, other: &Snapshot) -> bool {
		self.0 == other.0
	}

	pub(crate) fn insert(&mut self, key: String, value: String) -> Option<String> {
		self.0.insert(key, value)
	}
}

impl FromIterator<(String, String)> for Snapshot {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl From<HashMap<String, String>> for Snapshot {
	fn from(map: HashMap<String, String>) -> Self {
		Self(map)
	}
}
