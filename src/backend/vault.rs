/* src/backend/vault.rs */

use std::sync::Arc;

use async_trait::async_trait;

use super::{Backend, ValidationError};
use crate::auth::TokenProvider;
use crate::codec::{SecretEntry, decode_entries};
use crate::provider::ProviderError;
use crate::remote::VaultClient;
use crate::snapshot::Snapshot;

/// Identifier set for the secrets vault.
///
/// `path_separator` stands in for the `:` delimiter, which the vault
/// forbids inside entry keys; it must not be the NUL default.
#[derive(Debug, Clone)]
pub struct VaultSettings {
	pub secret_id: String,
	/// Optional prefix stripped from entry keys, case-insensitively.
	pub path: Option<String>,
	pub path_separator: char,
}

impl VaultSettings {
	fn validate(&self) -> Result<(), ValidationError> {
		if self.secret_id.is_empty() {
			return Err(ValidationError {
				field: "secret_id",
				reason: "must not be empty",
			});
		}

		if self.path_separator == '\0' {
			return Err(ValidationError {
				field: "path_separator",
				reason: "must be set to a non-default character",
			});
		}

		Ok(())
	}
}

/// Backend for the secrets vault.
///
/// No version negotiation: every fetch returns the full entry list. An
/// empty list means there is nothing to load and the cycle ends as a
/// no-op, leaving any previous snapshot in place.
pub struct VaultBackend {
	client: VaultClient,
	tokens: Arc<dyn TokenProvider>,
	settings: VaultSettings,
	name: String,
}

impl VaultBackend {
	pub fn new(
		client: VaultClient,
		tokens: Arc<dyn TokenProvider>,
		settings: VaultSettings,
	) -> Result<Self, ValidationError> {
		settings.validate()?;

		let name = format!("vault:{}", settings.secret_id);

		Ok(Self {
			client,
			tokens,
			settings,
			name,
		})
	}
}

#[async_trait]
impl Backend for VaultBackend {
	type Payload = Vec<SecretEntry>;

	fn name(&self) -> &str {
		&self.name
	}

	async fn fetch(&self) -> Result<Option<Vec<SecretEntry>>, ProviderError> {
		let token = self.tokens.token().await?;
		let entries = self.client.get_payload(&self.settings.secret_id, &token).await?;

		if entries.is_empty() {
			return Ok(None);
		}

		Ok(Some(entries))
	}

	fn decode(&self, payload: Vec<SecretEntry>) -> Result<Snapshot, ProviderError> {
		let snapshot = decode_entries(
			&payload,
			self.settings.path.as_deref(),
			self.settings.path_separator,
		)?;

		Ok(snapshot)
	}
}

impl std::fmt::Debug for VaultBackend {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("VaultBackend")
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}
