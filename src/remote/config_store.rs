/* src/remote/config_store.rs */

use reqwest::StatusCode;

use super::TransportError;

/// Response header carrying the remote document revision.
pub const VERSION_HEADER: &str = "x-configuration-version";

/// Identifier set for one configuration document fetch.
#[derive(Debug, Clone, Copy)]
pub struct ConfigRequest<'a> {
	pub application: &'a str,
	pub environment: &'a str,
	pub configuration: &'a str,
	pub client_id: &'a str,
	/// Last version observed by the caller, `"0"` when none yet.
	pub known_version: &'a str,
}

/// A configuration document together with its remote revision.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
	pub content: Vec<u8>,
	pub version: String,
}

/// Outcome of a version-negotiated fetch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
	/// The remote reported the known version; no data was transferred.
	Unchanged,
	Changed(ConfigDocument),
}

/// Thin typed client for the structured-config service.
#[derive(Debug, Clone)]
pub struct ConfigStoreClient {
	http: reqwest::Client,
	base_url: String,
}

impl ConfigStoreClient {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_owned(),
		}
	}

	/// Fetches the current document for the given identifier set.
	///
	/// The request carries the caller's last-known version; when the remote
	/// still serves that revision it answers `304 Not Modified` and no
	/// payload is transferred.
	pub async fn get_configuration(
		&self,
		request: &ConfigRequest<'_>,
		token: &str,
	) -> Result<FetchOutcome, TransportError> {
		let endpoint = format!(
			"{}/v1/applications/{}/environments/{}/configurations/{}",
			self.base_url, request.application, request.environment, request.configuration,
		);

		let response = self
			.http
			.get(&endpoint)
			.query(&[
				("client_id", request.client_id),
				("client_configuration_version", request.known_version),
			])
			.bearer_auth(token)
			.send()
			.await?;

		match response.status() {
			StatusCode::NOT_MODIFIED => Ok(FetchOutcome::Unchanged),
			StatusCode::OK => {
				let version = response
					.headers()
					.get(VERSION_HEADER)
					.and_then(|value| value.to_str().ok())
					.map(str::to_owned)
					.ok_or(TransportError::MissingVersion)?;

				let content = response.bytes().await?.to_vec();

				tracing::debug!(%endpoint, %version, bytes = content.len(), "fetched configuration");
				Ok(FetchOutcome::Changed(ConfigDocument { content, version }))
			}
			status => Err(TransportError::Status {
				status: status.as_u16(),
				endpoint,
			}),
		}
	}
}
