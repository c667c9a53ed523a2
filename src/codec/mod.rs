/* src/codec/mod.rs */

mod entries;
mod error;
mod json;

pub use entries::{SecretEntry, SecretValueKind, decode_entries};
pub use error::FormatError;
pub use json::flatten_document;

/// Delimiter joining hierarchical key segments in a snapshot.
pub const KEY_DELIMITER: char = ':';
