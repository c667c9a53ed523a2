/* src/remote/vault.rs */

use serde::Deserialize;

use super::TransportError;
use crate::codec::SecretEntry;

#[derive(Debug, Deserialize)]
struct PayloadBody {
	#[serde(default)]
	entries: Vec<SecretEntry>,
}

/// Thin typed client for the secrets vault.
///
/// The vault has no version negotiation; every call returns the full
/// current entry list for the secret.
#[derive(Debug, Clone)]
pub struct VaultClient {
	http: reqwest::Client,
	base_url: String,
}

impl VaultClient {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_owned(),
		}
	}

	/// Fetches the current payload entries of a secret.
	pub async fn get_payload(
		&self,
		secret_id: &str,
		token: &str,
	) -> Result<Vec<SecretEntry>, TransportError> {
		let endpoint = format!("{}/v1/secrets/{}/payload", self.base_url, secret_id);

		let response = self.http.get(&endpoint).bearer_auth(token).send().await?;

		let status = response.status();
		if !status.is_success() {
			return Err(TransportError::Status {
				status: status.as_u16(),
				endpoint,
			});
		}

		let body: PayloadBody = response.json().await?;
		tracing::debug!(%endpoint, entries = body.entries.len(), "fetched secret payload");
		Ok(body.entries)
	}
}
