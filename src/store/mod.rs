//! The resource list core: in-memory state, snapshot cache, remote sync
//! and local mutations.

pub mod mutation;
pub mod snapshot;
pub mod state;
pub mod sync;

pub use mutation::{bulk_delete, create_record, delete_record, update_record};
pub use snapshot::{LoadOutcome, SNAPSHOT_SCHEMA_VERSION, SnapshotStore};
pub use state::{ListState, SharedList, shared};
pub use sync::{AutoRefresh, Syncer};
