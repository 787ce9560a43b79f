/// Sync scheduling for a sharded chain node.
///
/// Peers announce new blocks; each announcement becomes a [`Task`] that knows
/// how to bring the local chain up to the announced block. The
/// [`Synchronizer`] decides which task runs next:
///
/// - **Task Queue**: at most one pending task per peer; a newer announcement
///   replaces the older one but keeps the peer's place in line
/// - **Synchronizer**: scheduling loop plus a single worker running tasks
///   one at a time, highest priority first
/// - **Root Block Sync Task**: downloads the missing part of a peer's root
///   chain and inserts it
///
/// ## Scheduling
///
/// 1. `add_task` hands a task to the scheduling loop and waits for it to be
///    queued
/// 2. When the worker becomes idle it asks the loop for work
/// 3. The loop picks the highest-priority task, oldest peer first on ties
/// 4. The worker runs it; failures are logged and not retried
///
/// ## State Machine
///
/// - **RUNNING**: accepting and dispatching tasks
/// - **CLOSED**: terminal, queue discarded
pub mod config;
pub mod peer;
pub mod queue;
pub mod root_task;
pub mod service;
pub mod states;
pub mod task;

pub use config::*;
pub use peer::Peer;
pub use queue::TaskQueue;
pub use root_task::{RootBlockSyncTask, SyncTaskError};
pub use service::{SyncError, Synchronizer};
pub use states::SchedulerState;
pub use task::Task;

#[cfg(test)]
mod tests;
