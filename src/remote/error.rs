/* src/remote/error.rs */

use std::time::Duration;

/// Errors raised while talking to a remote collaborator.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),

	/// The remote answered with an unexpected status code.
	#[error("unexpected status {status} from {endpoint}")]
	Status { status: u16, endpoint: String },

	/// The remote answered without a configuration version.
	#[error("response is missing the configuration version")]
	MissingVersion,

	/// The fetch exceeded the per-cycle deadline.
	#[error("fetch timed out after {limit:?}")]
	Timeout { limit: Duration },
}
