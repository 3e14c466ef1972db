//! Snapshot ingest, state fetch, and the synchronizer that drives the
//! display from them.

pub mod fetch;
pub mod realtime;
pub mod synchronizer;

pub use fetch::{SnapshotSource, StateClient};
pub use realtime::{RealtimeClient, RealtimeClientConfig};
pub use synchronizer::TableSynchronizer;
