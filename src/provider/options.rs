/* src/provider/options.rs */

use std::time::Duration;

use super::OnLoadException;

/// Default refresh period: 7 days.
pub const DEFAULT_RELOAD_PERIOD: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default per-cycle fetch deadline: 60 seconds.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Behavior settings shared by all provider backends.
///
/// Constructed once by the caller and never mutated after the provider is
/// built.
#[derive(Clone)]
pub struct ProviderOptions {
	/// When true, any load failure is swallowed unconditionally and the
	/// failure callback is not consulted.
	pub optional: bool,
	pub reload_period: Duration,
	pub load_timeout: Duration,
	pub on_load_exception: Option<OnLoadException>,
}

impl ProviderOptions {
	pub fn new() -> Self {
		Self {
			optional: false,
			reload_period: DEFAULT_RELOAD_PERIOD,
			load_timeout: DEFAULT_LOAD_TIMEOUT,
			on_load_exception: None,
		}
	}

	pub fn optional(mut self, optional: bool) -> Self {
		self.optional = optional;
		self
	}

	pub fn reload_period(mut self, period: Duration) -> Self {
		self.reload_period = period;
		self
	}

	pub fn load_timeout(mut self, timeout: Duration) -> Self {
		self.load_timeout = timeout;
		self
	}

	pub fn on_load_exception(mut self, callback: OnLoadException) -> Self {
		self.on_load_exception = Some(callback);
		self
	}
}

impl Default for ProviderOptions {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ProviderOptions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProviderOptions")
			.field("optional", &self.optional)
			.field("reload_period", &self.reload_period)
			.field("load_timeout", &self.load_timeout)
			.field("on_load_exception", &self.on_load_exception.is_some())
			.finish()
	}
}
