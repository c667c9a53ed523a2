/* src/backend/mod.rs */

mod config_store;
mod vault;

pub use config_store::{ConfigStoreBackend, ConfigStoreSettings, INITIAL_VERSION};
pub use vault::{VaultBackend, VaultSettings};

use async_trait::async_trait;

use crate::provider::ProviderError;
use crate::snapshot::Snapshot;

/// A required setting is missing or invalid.
///
/// Raised synchronously when a backend is constructed, before any network
/// activity, and never fed through the escalation policy.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid setting `{field}`: {reason}")]
pub struct ValidationError {
	pub field: &'static str,
	pub reason: &'static str,
}

/// The `{fetch, decode}` capability pair a provider is parameterized by.
///
/// Both remote integrations share the same reload-and-merge flow; only the
/// wire call and the payload shape differ. `fetch` performs the suspending
/// network work and may answer `None` to signal an unchanged remote (the
/// cycle then ends as a no-op). `decode` is synchronous and turns the
/// payload into a flat snapshot, never returning partial results.
#[async_trait]
pub trait Backend: Send + Sync {
	type Payload: Send;

	/// Stable display name, used in events and tracing.
	fn name(&self) -> &str;

	/// Retrieves the current payload, or `None` when there is nothing new.
	async fn fetch(&self) -> Result<Option<Self::Payload>, ProviderError>;

	/// Converts the payload into a snapshot.
	fn decode(&self, payload: Self::Payload) -> Result<Snapshot, ProviderError>;
}
