/* src/auth/mod.rs */

mod assertion;
mod error;
mod iam;
mod secret;

pub use assertion::JwtAssertion;
pub use error::AuthError;
pub use iam::{ExchangeAssertion, HttpTokenExchanger, IamToken, IamTokenProvider};
pub use secret::SecretString;

use async_trait::async_trait;

/// Supplies a bearer token for authenticating requests to a remote service.
///
/// Implementations own their refresh-before-expiry logic; callers ask for a
/// token per fetch cycle and never inspect expiry themselves.
#[async_trait]
pub trait TokenProvider: Send + Sync {
	/// Returns a currently valid bearer token.
	async fn token(&self) -> Result<String, AuthError>;
}

/// Token provider backed by a fixed, caller-supplied token.
pub struct StaticTokenProvider {
	token: SecretString,
}

impl StaticTokenProvider {
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			token: SecretString::new(token),
		}
	}
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
	async fn token(&self) -> Result<String, AuthError> {
		Ok(self.token.expose_secret().to_owned())
	}
}

impl std::fmt::Debug for StaticTokenProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StaticTokenProvider").finish_non_exhaustive()
	}
}
