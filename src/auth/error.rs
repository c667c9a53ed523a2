/* src/auth/error.rs */

/// Errors raised while acquiring a bearer token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
	/// The supplied private key could not be parsed.
	#[error("invalid signing key: {0}")]
	InvalidKey(#[source] jsonwebtoken::errors::Error),

	/// Signing the assertion failed.
	#[error("signing failed: {0}")]
	Signing(#[source] jsonwebtoken::errors::Error),

	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),

	/// The identity service rejected the token exchange.
	#[error("token exchange returned status {status}")]
	ExchangeStatus { status: u16 },
}
