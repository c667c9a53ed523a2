/* src/codec/entries.rs */

use std::collections::HashSet;

use serde::Deserialize;

use super::{FormatError, KEY_DELIMITER};
use crate::snapshot::Snapshot;

/// One entry of a vault secret payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretEntry {
	pub key: String,
	#[serde(default)]
	pub text_value: Option<String>,
	#[serde(default)]
	pub binary_value: Option<String>,
}

impl SecretEntry {
	/// Classifies the entry by which value field is populated.
	pub fn kind(&self) -> SecretValueKind {
		if self.text_value.is_some() {
			SecretValueKind::Text
		} else if self.binary_value.is_some() {
			SecretValueKind::Binary
		} else {
			SecretValueKind::Unknown
		}
	}
}

/// Value kind of a secret entry. Only text entries can become config values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretValueKind {
	Text,
	Binary,
	Unknown,
}

/// Translates vault secret entries into a snapshot.
///
/// Key transformation per entry: if `prefix` is set and the entry key
/// starts with it case-insensitively, the prefix and any leading separator
/// are stripped; then every occurrence of `separator` is replaced with the
/// `:` delimiter.
///
/// A binary or unknown-kind entry fails the whole decode. Partial results
/// are never returned. Keys are compared case-insensitively, so two entries
/// that collapse onto the same key fail the decode as well.
pub fn decode_entries(
	entries: &[SecretEntry],
	prefix: Option<&str>,
	separator: char,
) -> Result<Snapshot, FormatError> {
	let mut snapshot = Snapshot::new();
	let mut seen: HashSet<String> = HashSet::new();

	for entry in entries {
		match entry.kind() {
			SecretValueKind::Text => {}
			SecretValueKind::Binary => {
				return Err(FormatError::BinaryValue {
					key: entry.key.clone(),
				});
			}
			SecretValueKind::Unknown => {
				return Err(FormatError::UnknownValue {
					key: entry.key.clone(),
				});
			}
		}

		let key = translate_key(&entry.key, prefix, separator);

		if !seen.insert(key.to_ascii_lowercase()) {
			return Err(FormatError::DuplicateKey { key });
		}

		let value = entry.text_value.clone().unwrap_or_default();
		snapshot.insert(key, value);
	}

	Ok(snapshot)
}

fn translate_key(raw: &str, prefix: Option<&str>, separator: char) -> String {
	let mut key = raw;

	if let Some(prefix) = prefix.filter(|p| !p.is_empty())
		&& let Some(head) = key.get(..prefix.len())
		&& head.eq_ignore_ascii_case(prefix)
	{
		key = key[prefix.len()..].trim_start_matches(separator);
	}

	key.replace(separator, &KEY_DELIMITER.to_string())
}
