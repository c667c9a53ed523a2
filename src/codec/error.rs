/* src/codec/error.rs */

/// Errors raised while decoding a remote payload into a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
	/// The configuration document is not valid JSON.
	#[error("malformed document: {0}")]
	Json(#[from] serde_json::Error),

	/// The configuration document root is not an object.
	#[error("document root must be an object")]
	RootNotObject,

	/// A secret entry carries a binary value.
	#[error("binary secret value is not supported: {key}")]
	BinaryValue { key: String },

	/// A secret entry carries neither a text nor a binary value.
	#[error("unknown secret value kind: {key}")]
	UnknownValue { key: String },

	/// Two entries collapse onto the same hierarchical key.
	#[error("duplicate key after translation: {key}")]
	DuplicateKey { key: String },
}
