/* src/provider/error.rs */

use std::sync::Arc;

use crate::auth::AuthError;
use crate::backend::ValidationError;
use crate::codec::FormatError;
use crate::remote::TransportError;

/// Errors that can occur in a provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
	#[error("auth error: {0}")]
	Auth(#[from] AuthError),

	#[error("transport error: {0}")]
	Transport(#[from] TransportError),

	#[error("format error: {0}")]
	Format(#[from] FormatError),

	#[error("validation error: {0}")]
	Validation(#[from] ValidationError),

	#[error("builder error: {0}")]
	Builder(String),
}

/// Callback consulted when a load cycle fails.
///
/// Its decision is authoritative: whatever `ignore` is left at after the
/// call becomes the final disposition for the failure.
pub type OnLoadException = Arc<dyn Fn(&mut ExceptionContext<'_>) + Send + Sync>;

/// Context handed to the failure callback for one failed load cycle.
#[derive(Debug)]
pub struct ExceptionContext<'a> {
	/// Name of the provider backend that failed.
	pub provider: &'a str,
	/// The causal error.
	pub error: &'a ProviderError,
	/// True when the failure happened during a background reload rather
	/// than the initial load.
	pub reload: bool,
	/// Set to true to suppress re-raising the error.
	pub ignore: bool,
}
