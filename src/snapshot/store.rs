/* src/snapshot/store.rs */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use tokio::sync::broadcast;

use super::{Snapshot, SnapshotEvent};

/// Default event channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Thread-safe holder for the current configuration snapshot.
///
/// Readers load the snapshot wait-free; writers replace it wholesale with a
/// single atomic assignment. A snapshot is never partially visible: until a
/// new one supersedes it, the last published snapshot remains readable in
/// full. When concurrent reload cycles race, the later-completing swap wins.
pub struct SnapshotStore {
	inner: ArcSwap<Snapshot>,
	version: AtomicU64,
	events: broadcast::Sender<SnapshotEvent>,
}

impl SnapshotStore {
	/// Creates a new empty store with default event channel capacity.
	pub fn new() -> Self {
		Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
	}

	/// Creates a new empty store with custom event channel capacity.
	///
	/// Note: Events may be dropped if subscribers process slower than
	/// the write rate and the channel fills up.
	pub fn with_event_capacity(capacity: usize) -> Self {
		Self {
			inner: ArcSwap::from_pointee(Snapshot::new()),
			version: AtomicU64::new(0),
			events: broadcast::channel(capacity).0,
		}
	}

	/// Gets a value by key from the current snapshot. Wait-free.
	pub fn get(&self, key: &str) -> Option<String> {
		let snapshot = self.inner.load();
		snapshot.get(key).map(str::to_owned)
	}

	/// Returns the current snapshot.
	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.inner.load_full()
	}

	/// Returns all keys in the current snapshot.
	pub fn keys(&self) -> Vec<String> {
		self.inner.load().keys()
	}

	/// Returns the number of entries in the current snapshot.
	pub fn len(&self) -> usize {
		self.inner.load().len()
	}

	/// Returns true if the current snapshot is empty.
	pub fn is_empty(&self) -> bool {
		self.inner.load().is_empty()
	}

	/// Returns the store version, incremented on each replacement.
	pub fn version(&self) -> u64 {
		self.version.load(Ordering::SeqCst)
	}

	/// Replaces the current snapshot if `next` differs by content.
	///
	/// Returns true when the snapshot was swapped and an event emitted,
	/// false when `next` is content-equal to the current snapshot (the
	/// candidate is discarded and no event is sent).
	pub fn replace_if_changed(&self, next: Snapshot) -> bool {
		let current = self.inner.load_full();
		if current.content_equals(&next) {
			return false;
		}

		let new = Arc::new(next);
		let old = self.inner.swap(Arc::clone(&new));
		let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;

		let _ = self.events.send(SnapshotEvent::Replaced { version, old, new });
		true
	}

	/// Subscribes to snapshot replacement events.
	pub fn subscribe(&self) -> broadcast::Receiver<SnapshotEvent> {
		self.events.subscribe()
	}
}

impl Default for SnapshotStore {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for SnapshotStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SnapshotStore")
			.field("entries", &self.len())
			.field("version", &self.version())
			.finish_non_exhaustive()
	}
}
