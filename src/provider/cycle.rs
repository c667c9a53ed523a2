/* src/provider/cycle.rs */

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::AbortHandle;

use super::{ExceptionContext, ProviderError, ProviderOptions};
use crate::backend::Backend;
use crate::remote::TransportError;
use crate::snapshot::{Snapshot, SnapshotEvent, SnapshotStore};
use crate::tick::Ticker;

/// A periodically-refreshing configuration provider.
///
/// Orchestrates the reload cycle over a [`Backend`]: fetch bounded by
/// `load_timeout`, synchronous decode, content diff against the current
/// snapshot, atomic swap and change notification when different. The same
/// cycle serves the initial [`load`](Provider::load) and every background
/// tick; only the failure disposition differs.
pub struct Provider<B> {
	store: Arc<SnapshotStore>,
	backend: Arc<B>,
	options: ProviderOptions,
	abort_handle: Option<AbortHandle>,
}

impl<B> Clone for Provider<B> {
	fn clone(&self) -> Self {
		Self {
			store: self.store.clone(),
			backend: self.backend.clone(),
			options: self.options.clone(),
			abort_handle: self.abort_handle.clone(),
		}
	}
}

impl<B> Drop for Provider<B> {
	fn drop(&mut self) {
		if let Some(handle) = self.abort_handle.take() {
			handle.abort();
		}
	}
}

/// Builder for a provider.
pub struct ProviderBuilder<B> {
	store: Option<Arc<SnapshotStore>>,
	backend: Option<B>,
	options: ProviderOptions,
}

impl<B> ProviderBuilder<B>
where
	B: Backend + 'static,
{
	pub fn new() -> Self {
		Self {
			store: None,
			backend: None,
			options: ProviderOptions::default(),
		}
	}

	/// Supplies a shared store; a fresh one is created when omitted.
	pub fn store(mut self, store: Arc<SnapshotStore>) -> Self {
		self.store = Some(store);
		self
	}

	pub fn backend(mut self, backend: B) -> Self {
		self.backend = Some(backend);
		self
	}

	pub fn options(mut self, options: ProviderOptions) -> Self {
		self.options = options;
		self
	}

	pub fn build(self) -> Result<Provider<B>, ProviderError> {
		let backend = self
			.backend
			.ok_or_else(|| ProviderError::Builder("backend is required".to_owned()))?;
		let store = self.store.unwrap_or_default();

		Ok(Provider {
			store,
			backend: Arc::new(backend),
			options: self.options,
			abort_handle: None,
		})
	}

	/// Builds the provider, performs the initial load and starts the
	/// background refresh schedule.
	///
	/// The initial load blocks the caller; when it fails and the failure is
	/// not ignored, registration fails and no schedule is started.
	pub async fn register(self) -> Result<Provider<B>, ProviderError> {
		let mut provider = self.build()?;
		provider.load().await?;
		provider.start_watching();
		Ok(provider)
	}
}

impl<B> Default for ProviderBuilder<B>
where
	B: Backend + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<B> Provider<B>
where
	B: Backend + 'static,
{
	pub fn builder() -> ProviderBuilder<B> {
		ProviderBuilder::new()
	}

	pub fn new(store: Arc<SnapshotStore>, backend: B, options: ProviderOptions) -> Self {
		Self {
			store,
			backend: Arc::new(backend),
			options,
			abort_handle: None,
		}
	}

	/// Performs the initial load, blocking the caller.
	///
	/// Invoked once at registration time. A failure that survives the
	/// escalation policy is returned and the provider must be considered
	/// not constructed.
	pub async fn load(&self) -> Result<(), ProviderError> {
		load_cycle(&self.store, self.backend.as_ref(), &self.options, false).await
	}

	/// Runs one reload cycle as a background tick would.
	pub async fn reload(&self) -> Result<(), ProviderError> {
		load_cycle(&self.store, self.backend.as_ref(), &self.options, true).await
	}

	/// Gets a value by key from the current snapshot.
	pub fn get(&self, key: &str) -> Option<String> {
		self.store.get(key)
	}

	/// Returns the current snapshot.
	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.store.snapshot()
	}

	/// Returns the shared store backing this provider.
	pub fn store(&self) -> Arc<SnapshotStore> {
		self.store.clone()
	}

	/// Subscribes to snapshot replacement events.
	pub fn subscribe(&self) -> broadcast::Receiver<SnapshotEvent> {
		self.store.subscribe()
	}

	/// Starts the periodic refresh schedule.
	///
	/// One self-re-arming timer per provider: after each `reload_period`
	/// the reload cycle runs as an independent task and the timer re-arms
	/// immediately. Errors that survive the escalation policy on a
	/// background tick are logged at error level and the schedule
	/// continues; the failure callback is the place to decide otherwise.
	pub fn start_watching(&mut self) {
		if self.abort_handle.is_some() {
			return;
		}

		let store = Arc::clone(&self.store);
		let backend = Arc::clone(&self.backend);
		let options = self.options.clone();

		let handle = Ticker::new(self.options.reload_period).spawn(move || {
			let store = Arc::clone(&store);
			let backend = Arc::clone(&backend);
			let options = options.clone();

			async move {
				if let Err(err) = load_cycle(&store, backend.as_ref(), &options, true).await {
					tracing::error!(
						provider = backend.name(),
						error = %err,
						"background reload failed",
					);
				}
			}
		});

		self.abort_handle = Some(handle);
	}

	/// Consuming variant of [`start_watching`](Provider::start_watching).
	pub fn watch(mut self) -> Self {
		self.start_watching();
		self
	}

	/// Stops the periodic refresh schedule.
	pub fn stop_watching(&mut self) {
		if let Some(handle) = self.abort_handle.take() {
			handle.abort();
		}
	}

	/// Returns true if the refresh schedule is running.
	pub fn is_watching(&self) -> bool {
		self.abort_handle.is_some()
	}
}

impl<B: Backend> std::fmt::Debug for Provider<B> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Provider")
			.field("backend", &self.backend.name())
			.field("store", &self.store)
			.field("options", &self.options)
			.field("watching", &self.abort_handle.is_some())
			.finish()
	}
}

#[derive(Debug)]
enum CycleOutcome {
	Unchanged,
	Identical,
	Replaced,
}

/// One fetch-decode-diff-swap sequence plus the escalation policy.
async fn load_cycle<B: Backend>(
	store: &SnapshotStore,
	backend: &B,
	options: &ProviderOptions,
	reload: bool,
) -> Result<(), ProviderError> {
	match run_cycle(store, backend, options).await {
		Ok(outcome) => {
			tracing::debug!(provider = backend.name(), reload, ?outcome, "load cycle finished");
			Ok(())
		}
		Err(err) => escalate(backend.name(), err, options, reload),
	}
}

async fn run_cycle<B: Backend>(
	store: &SnapshotStore,
	backend: &B,
	options: &ProviderOptions,
) -> Result<CycleOutcome, ProviderError> {
	let limit = options.load_timeout;

	let fetched = match tokio::time::timeout(limit, backend.fetch()).await {
		Ok(fetched) => fetched?,
		Err(_) => return Err(TransportError::Timeout { limit }.into()),
	};

	let Some(payload) = fetched else {
		return Ok(CycleOutcome::Unchanged);
	};

	let snapshot = backend.decode(payload)?;

	if store.replace_if_changed(snapshot) {
		Ok(CycleOutcome::Replaced)
	} else {
		Ok(CycleOutcome::Identical)
	}
}

fn escalate(
	provider: &str,
	err: ProviderError,
	options: &ProviderOptions,
	reload: bool,
) -> Result<(), ProviderError> {
	if options.optional {
		tracing::debug!(provider, error = %err, reload, "optional provider, failure swallowed");
		return Ok(());
	}

	let mut ignore = reload;

	if let Some(callback) = &options.on_load_exception {
		let mut context = ExceptionContext {
			provider,
			error: &err,
			reload,
			ignore: false,
		};
		callback(&mut context);
		ignore = context.ignore;
	}

	if ignore {
		tracing::warn!(provider, error = %err, reload, "load cycle failed, ignoring");
		Ok(())
	} else {
		Err(err)
	}
}
