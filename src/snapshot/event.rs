/* src/snapshot/event.rs */

use std::sync::Arc;

use super::Snapshot;

/// Events emitted by the store when a snapshot is replaced.
#[derive(Debug, Clone)]
pub enum SnapshotEvent {
	/// A new snapshot superseded the previous one.
	Replaced {
		/// Store version after the swap, incremented on each replacement.
		version: u64,
		old: Arc<Snapshot>,
		new: Arc<Snapshot>,
	},
}
