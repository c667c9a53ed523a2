/* src/snapshot/mod.rs */

mod event;
mod map;
mod store;

pub use event::SnapshotEvent;
pub use map::Snapshot;
pub use store::{DEFAULT_EVENT_CAPACITY, SnapshotStore};
