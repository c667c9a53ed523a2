/* tests/codec_tests.rs */

use pollbox::codec::{FormatError, SecretEntry, SecretValueKind, decode_entries, flatten_document};

fn text_entry(key: &str, value: &str) -> SecretEntry {
	SecretEntry {
		key: key.to_owned(),
		text_value: Some(value.to_owned()),
		binary_value: None,
	}
}

#[test]
fn test_flatten_nested_document() {
	let snapshot = flatten_document(br#"{"a":{"b":"1"},"c":"2"}"#).unwrap();

	assert_eq!(snapshot.len(), 2);
	assert_eq!(snapshot.get("a:b"), Some("1"));
	assert_eq!(snapshot.get("c"), Some("2"));
}

#[test]
fn test_flatten_deep_nesting() {
	let snapshot = flatten_document(br#"{"a":{"b":{"c":{"d":"x"}}}}"#).unwrap();

	assert_eq!(snapshot.get("a:b:c:d"), Some("x"));
}

#[test]
fn test_flatten_scalar_leaves() {
	let snapshot =
		flatten_document(br#"{"num":5,"flag":true,"list":[1,2],"none":null}"#).unwrap();

	assert_eq!(snapshot.get("num"), Some("5"));
	assert_eq!(snapshot.get("flag"), Some("true"));
	assert_eq!(snapshot.get("list"), Some("[1,2]"));
	assert_eq!(snapshot.get("none"), Some(""));
}

#[test]
fn test_flatten_empty_payload() {
	assert!(flatten_document(b"").unwrap().is_empty());
	assert!(flatten_document(b"{}").unwrap().is_empty());
}

#[test]
fn test_flatten_root_must_be_object() {
	let err = flatten_document(b"[1,2]").unwrap_err();
	assert!(matches!(err, FormatError::RootNotObject));
}

#[test]
fn test_flatten_malformed_document() {
	let err = flatten_document(b"{not json").unwrap_err();
	assert!(matches!(err, FormatError::Json(_)));
}

#[test]
fn test_decode_entries_strips_prefix_and_translates_separator() {
	let entries = [text_entry("prefix-sub-key", "v")];
	let snapshot = decode_entries(&entries, Some("prefix"), '-').unwrap();

	assert_eq!(snapshot.get("sub:key"), Some("v"));
}

#[test]
fn test_decode_entries_prefix_match_is_case_insensitive() {
	let entries = [text_entry("PREFIX-Sub-Key", "v")];
	let snapshot = decode_entries(&entries, Some("prefix"), '-').unwrap();

	assert_eq!(snapshot.get("Sub:Key"), Some("v"));
}

#[test]
fn test_decode_entries_without_prefix() {
	let entries = [text_entry("db-host", "localhost"), text_entry("db-port", "5432")];
	let snapshot = decode_entries(&entries, None, '-').unwrap();

	assert_eq!(snapshot.get("db:host"), Some("localhost"));
	assert_eq!(snapshot.get("db:port"), Some("5432"));
}

#[test]
fn test_decode_entries_unrelated_key_keeps_full_path() {
	let entries = [text_entry("other-key", "v")];
	let snapshot = decode_entries(&entries, Some("prefix"), '-').unwrap();

	assert_eq!(snapshot.get("other:key"), Some("v"));
}

#[test]
fn test_binary_entry_fails_whole_decode() {
	let entries = [
		text_entry("ok", "v"),
		SecretEntry {
			key: "blob".to_owned(),
			text_value: None,
			binary_value: Some("AAAA".to_owned()),
		},
	];

	let err = decode_entries(&entries, None, '-').unwrap_err();
	assert!(matches!(err, FormatError::BinaryValue { key } if key == "blob"));
}

#[test]
fn test_unknown_entry_fails_whole_decode() {
	let entries = [SecretEntry {
		key: "mystery".to_owned(),
		text_value: None,
		binary_value: None,
	}];

	let err = decode_entries(&entries, None, '-').unwrap_err();
	assert!(matches!(err, FormatError::UnknownValue { key } if key == "mystery"));
}

#[test]
fn test_duplicate_keys_fail_case_insensitively() {
	let entries = [text_entry("Key", "a"), text_entry("key", "b")];

	let err = decode_entries(&entries, None, '-').unwrap_err();
	assert!(matches!(err, FormatError::DuplicateKey { .. }));
}

#[test]
fn test_entry_kind_classification() {
	assert_eq!(text_entry("k", "v").kind(), SecretValueKind::Text);

	let binary = SecretEntry {
		key: "k".to_owned(),
		text_value: None,
		binary_value: Some("x".to_owned()),
	};
	assert_eq!(binary.kind(), SecretValueKind::Binary);

	let unknown = SecretEntry {
		key: "k".to_owned(),
		text_value: None,
		binary_value: None,
	};
	assert_eq!(unknown.kind(), SecretValueKind::Unknown);
}

#[test]
fn test_decode_is_deterministic() {
	let entries = [text_entry("a-b", "1"), text_entry("c", "2")];

	let first = decode_entries(&entries, None, '-').unwrap();
	let second = decode_entries(&entries, None, '-').unwrap();

	assert!(first.content_equals(&second));
}
