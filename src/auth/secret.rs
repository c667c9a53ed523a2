/* src/auth/secret.rs */

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string wrapper that redacts its contents in Debug and Display.
///
/// Holds private keys and bearer tokens so they never leak through logging
/// or error formatting. The backing memory is zeroed on drop. The actual
/// value is only reachable through [`SecretString::expose_secret`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
	pub fn new(secret: impl Into<String>) -> Self {
		Self(secret.into())
	}

	/// Exposes the underlying secret value. Never log the result.
	pub fn expose_secret(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Debug for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("SecretString([REDACTED])")
	}
}

impl std::fmt::Display for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("[REDACTED]")
	}
}
