/* src/auth/assertion.rs */

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

use super::{AuthError, SecretString};

/// Assertion lifetime: `exp = iat + 3600`.
const ASSERTION_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
struct Claims<'a> {
	aud: &'a str,
	iss: &'a str,
	iat: i64,
	exp: i64,
}

/// Builds PS256-signed service-account assertions for the token exchange.
///
/// Claims: audience, issuer = service-account id, issued-at, expiry =
/// issued-at + 3600 s. The authorized key id travels in the `kid` header.
pub struct JwtAssertion {
	service_account_id: String,
	audience: String,
	header: Header,
	encoding_key: EncodingKey,
}

impl JwtAssertion {
	/// Parses the RSA private key and prepares the signing header.
	///
	/// Fails with [`AuthError::InvalidKey`] on a malformed key; no network
	/// activity happens here.
	pub fn new(
		service_account_id: impl Into<String>,
		key_id: impl Into<String>,
		private_key: &SecretString,
		audience: impl Into<String>,
	) -> Result<Self, AuthError> {
		let encoding_key = EncodingKey::from_rsa_pem(private_key.expose_secret().as_bytes())
			.map_err(AuthError::InvalidKey)?;

		let mut header = Header::new(Algorithm::PS256);
		header.kid = Some(key_id.into());

		Ok(Self {
			service_account_id: service_account_id.into(),
			audience: audience.into(),
			header,
			encoding_key,
		})
	}

	/// Signs a fresh assertion with the clock read at call time.
	pub fn encode(&self) -> Result<String, AuthError> {
		let now = Utc::now().timestamp();
		let claims = Claims {
			aud: &self.audience,
			iss: &self.service_account_id,
			iat: now,
			exp: now + ASSERTION_TTL_SECS,
		};

		jsonwebtoken::encode(&self.header, &claims, &self.encoding_key).map_err(AuthError::Signing)
	}
}

impl std::fmt::Debug for JwtAssertion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JwtAssertion")
			.field("service_account_id", &self.service_account_id)
			.field("audience", &self.audience)
			.finish_non_exhaustive()
	}
}
