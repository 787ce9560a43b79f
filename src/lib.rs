//! Sync scheduling and chain storage for a sharded blockchain node.
//!
//! - [`containers`]: block, header and receipt types shared by both
//!   hierarchies
//! - [`chain`]: the capabilities sync work needs from a chain
//! - [`storage`]: key schema, typed accessors and ancestor search
//! - [`networking`]: the priority synchronizer and root block sync task

pub use chain;
pub use containers;
pub use networking;
pub use storage;

pub use networking::sync::{RootBlockSyncTask, SyncConfig, SyncError, Synchronizer, Task};
pub use storage::{Database, MemoryDatabase, StoreError};
