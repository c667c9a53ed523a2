/* src/auth/iam.rs */

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use super::{AuthError, JwtAssertion, TokenProvider};

/// Safety margin before expiry at which a cached token is regenerated.
const EXPIRY_MARGIN_SECS: i64 = 300;

/// A short-lived bearer token with its expiry timestamp.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IamToken {
	pub iam_token: String,
	pub expires_at: DateTime<Utc>,
}

/// Exchanges a signed assertion for a bearer token at the identity service.
#[async_trait]
pub trait ExchangeAssertion: Send + Sync {
	async fn exchange(&self, assertion: &str) -> Result<IamToken, AuthError>;
}

#[derive(serde::Serialize)]
struct ExchangeBody<'a> {
	jwt: &'a str,
}

/// HTTP exchanger talking to the identity service token endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenExchanger {
	http: reqwest::Client,
	base_url: String,
}

impl HttpTokenExchanger {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_owned(),
		}
	}
}

#[async_trait]
impl ExchangeAssertion for HttpTokenExchanger {
	async fn exchange(&self, assertion: &str) -> Result<IamToken, AuthError> {
		let endpoint = format!("{}/v1/tokens", self.base_url);

		let response = self
			.http
			.post(&endpoint)
			.json(&ExchangeBody { jwt: assertion })
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AuthError::ExchangeStatus {
				status: status.as_u16(),
			});
		}

		Ok(response.json().await?)
	}
}

/// Token provider that signs an assertion and exchanges it for a bearer
/// token, caching the result until shortly before expiry.
///
/// Exactly one cached token is held. A call regenerates it when absent or
/// when its expiry lies within 300 s of the clock read at call time; one
/// network round-trip per regeneration, none otherwise. There is no retry:
/// signing and exchange failures surface to the caller.
pub struct IamTokenProvider {
	assertion: JwtAssertion,
	exchanger: Box<dyn ExchangeAssertion>,
	cached: Mutex<Option<IamToken>>,
}

impl IamTokenProvider {
	pub fn new(assertion: JwtAssertion, exchanger: impl ExchangeAssertion + 'static) -> Self {
		Self {
			assertion,
			exchanger: Box::new(exchanger),
			cached: Mutex::new(None),
		}
	}
}

#[async_trait]
impl TokenProvider for IamTokenProvider {
	async fn token(&self) -> Result<String, AuthError> {
		let mut cached = self.cached.lock().await;

		let threshold = Utc::now() + TimeDelta::seconds(EXPIRY_MARGIN_SECS);
		if let Some(token) = cached.as_ref()
			&& token.expires_at > threshold
		{
			return Ok(token.iam_token.clone());
		}

		let jwt = self.assertion.encode()?;
		let fresh = self.exchanger.exchange(&jwt).await?;
		tracing::debug!(expires_at = %fresh.expires_at, "exchanged assertion for bearer token");

		let token = fresh.iam_token.clone();
		*cached = Some(fresh);
		Ok(token)
	}
}

impl std::fmt::Debug for IamTokenProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IamTokenProvider")
			.field("assertion", &self.assertion)
			.finish_non_exhaustive()
	}
}
