/* src/backend/config_store.rs */

use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;

use super::{Backend, ValidationError};
use crate::auth::TokenProvider;
use crate::codec::flatten_document;
use crate::provider::ProviderError;
use crate::remote::{ConfigDocument, ConfigRequest, ConfigStoreClient, FetchOutcome};
use crate::snapshot::Snapshot;

/// Sentinel version meaning "no revision observed yet".
pub const INITIAL_VERSION: &str = "0";

/// Identifier set for the structured-config service.
///
/// All identifiers are required and lower-cased before transmission.
#[derive(Debug, Clone)]
pub struct ConfigStoreSettings {
	pub application: String,
	pub environment: String,
	pub configuration: String,
	pub client_id: String,
}

impl ConfigStoreSettings {
	fn validate(&self) -> Result<(), ValidationError> {
		let required = [
			("application", &self.application),
			("environment", &self.environment),
			("configuration", &self.configuration),
			("client_id", &self.client_id),
		];

		for (field, value) in required {
			if value.is_empty() {
				return Err(ValidationError {
					field,
					reason: "must not be empty",
				});
			}
		}

		Ok(())
	}

	fn normalized(self) -> Self {
		Self {
			application: self.application.to_lowercase(),
			environment: self.environment.to_lowercase(),
			configuration: self.configuration.to_lowercase(),
			client_id: self.client_id.to_lowercase(),
		}
	}
}

/// Backend for the structured-config service.
///
/// Keeps an instance-scoped version marker, initialized to `"0"` and
/// updated only after a successful decode. A fetch whose remote revision
/// matches the marker ends the cycle as a no-op without transferring or
/// decoding any data.
pub struct ConfigStoreBackend {
	client: ConfigStoreClient,
	tokens: Arc<dyn TokenProvider>,
	settings: ConfigStoreSettings,
	version: ArcSwap<String>,
	name: String,
}

impl ConfigStoreBackend {
	pub fn new(
		client: ConfigStoreClient,
		tokens: Arc<dyn TokenProvider>,
		settings: ConfigStoreSettings,
	) -> Result<Self, ValidationError> {
		settings.validate()?;
		let settings = settings.normalized();

		let name = format!(
			"config-store:{}/{}/{}",
			settings.application, settings.environment, settings.configuration,
		);

		Ok(Self {
			client,
			tokens,
			settings,
			version: ArcSwap::from_pointee(INITIAL_VERSION.to_owned()),
			name,
		})
	}

	/// Last version accepted by a successful decode.
	pub fn known_version(&self) -> String {
		self.version.load().as_ref().clone()
	}
}

#[async_trait]
impl Backend for ConfigStoreBackend {
	type Payload = ConfigDocument;

	fn name(&self) -> &str {
		&self.name
	}

	async fn fetch(&self) -> Result<Option<ConfigDocument>, ProviderError> {
		let token = self.tokens.token().await?;
		let known_version = self.version.load_full();

		let request = ConfigRequest {
			application: &self.settings.application,
			environment: &self.settings.environment,
			configuration: &self.settings.configuration,
			client_id: &self.settings.client_id,
			known_version: &known_version,
		};

		match self.client.get_configuration(&request, &token).await? {
			FetchOutcome::Unchanged => Ok(None),
			// Guard against remotes that ignore version negotiation.
			FetchOutcome::Changed(document) if document.version == *known_version => Ok(None),
			FetchOutcome::Changed(document) => Ok(Some(document)),
		}
	}

	fn decode(&self, payload: ConfigDocument) -> Result<Snapshot, ProviderError> {
		let snapshot = flatten_document(&payload.content)?;
		self.version.store(Arc::new(payload.version));
		Ok(snapshot)
	}
}

impl std::fmt::Debug for ConfigStoreBackend {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConfigStoreBackend")
			.field("settings", &self.settings)
			.field("known_version", &self.known_version())
			.finish_non_exhaustive()
	}
}
