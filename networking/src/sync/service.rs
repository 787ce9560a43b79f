use std::sync::Arc;

use chain::Blockchain;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use super::{queue::TaskQueue, states::SchedulerState, task::Task};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyncError {
    #[error("synchronizer is closed")]
    Closed,
}

enum Command {
    AddTask {
        task: Box<dyn Task>,
        ack: oneshot::Sender<()>,
    },
    Close {
        ack: oneshot::Sender<()>,
    },
}

/// Handed to the scheduling loop by an idle worker; the loop answers with
/// the task to run next.
type WorkRequest = oneshot::Sender<Box<dyn Task>>;

/// Priority scheduler for peer-announced sync tasks.
///
/// Runs as two tokio tasks:
/// 1. The scheduling loop owns the queue. It accepts commands from handles
///    and, whenever the worker is idle, hands it the best queued task.
/// 2. The worker runs one task at a time against the chain.
///
/// Selection happens at hand-over time, so a task that arrives while the
/// worker is busy still competes with everything queued before it.
#[derive(Clone)]
pub struct Synchronizer {
    commands: mpsc::Sender<Command>,
    state: Arc<Mutex<SchedulerState>>,
}

impl Synchronizer {
    /// Spawns the scheduling loop and the worker on the current runtime.
    pub fn new(chain: Arc<dyn Blockchain>) -> Self {
        let (command_tx, command_rx) = mpsc::channel(1);
        let (ready_tx, ready_rx) = mpsc::channel(1);
        let state = Arc::new(Mutex::new(SchedulerState::default()));

        tokio::spawn(scheduling_loop(command_rx, ready_rx, state.clone()));
        tokio::spawn(worker_loop(chain, ready_tx));

        Self {
            commands: command_tx,
            state,
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.lock()
    }

    /// Queues `task`, replacing any task from the same peer that has not been
    /// dispatched yet. Returns once the scheduling loop has taken the task.
    pub async fn add_task(&self, task: Box<dyn Task>) -> Result<(), SyncError> {
        if self.state() == SchedulerState::Closed {
            return Err(SyncError::Closed);
        }

        let (ack, acked) = oneshot::channel();
        self.commands
            .send(Command::AddTask { task, ack })
            .await
            .map_err(|_| SyncError::Closed)?;

        // The loop drops unprocessed commands when it closes.
        acked.await.map_err(|_| SyncError::Closed)
    }

    /// Stops dispatching. Queued tasks are discarded; a task the worker is
    /// already running finishes on its own. Calling this again is a no-op.
    pub async fn close(&self) -> Result<(), SyncError> {
        let (ack, acked) = oneshot::channel();
        if self.commands.send(Command::Close { ack }).await.is_err() {
            return Ok(());
        }

        // Either acknowledged, or the loop was closed by a concurrent call
        // and dropped this command unread.
        let _ = acked.await;
        Ok(())
    }
}

async fn scheduling_loop(
    mut commands: mpsc::Receiver<Command>,
    mut ready: mpsc::Receiver<WorkRequest>,
    state: Arc<Mutex<SchedulerState>>,
) {
    let mut queue = TaskQueue::new();
    let mut waiting: Option<WorkRequest> = None;
    let mut worker_alive = true;

    loop {
        tokio::select! {
            // Readiness is polled first so a stream of adds cannot hold off dispatch.
            biased;

            request = ready.recv(), if waiting.is_none() && worker_alive => match request {
                Some(request) => waiting = Some(request),
                None => {
                    error!(queued = queue.len(), "Sync worker stopped unexpectedly");
                    worker_alive = false;
                }
            },

            command = commands.recv() => match command {
                Some(Command::AddTask { task, ack }) => {
                    let peer_id = task.peer_id().to_string();
                    let priority = task.priority();

                    if queue.insert(task).is_some() {
                        debug!(peer = %peer_id, priority, "Replaced queued sync task");
                    } else {
                        debug!(peer = %peer_id, priority, queued = queue.len(), "Queued sync task");
                    }

                    let _ = ack.send(());
                }
                Some(Command::Close { ack }) => {
                    close(&state, &mut queue, &mut waiting);
                    let _ = ack.send(());
                    break;
                }
                None => {
                    debug!("All synchronizer handles dropped");
                    close(&state, &mut queue, &mut waiting);
                    break;
                }
            },
        }

        dispatch(&mut queue, &mut waiting);
    }
}

/// Hands the best queued task to the worker if it is waiting for one.
fn dispatch(queue: &mut TaskQueue, waiting: &mut Option<WorkRequest>) {
    if queue.is_empty() {
        return;
    }
    let Some(request) = waiting.take() else {
        return;
    };
    let Some(task) = queue.pop_best() else {
        *waiting = Some(request);
        return;
    };

    debug!(
        peer = %task.peer_id(),
        priority = task.priority(),
        remaining = queue.len(),
        "Dispatching sync task"
    );

    if let Err(task) = request.send(task) {
        warn!(peer = %task.peer_id(), "Sync worker went away, dropping task");
    }
}

fn close(
    state: &Mutex<SchedulerState>,
    queue: &mut TaskQueue,
    waiting: &mut Option<WorkRequest>,
) {
    {
        let mut state = state.lock();
        if state.can_transition_to(SchedulerState::Closed) {
            *state = SchedulerState::Closed;
        }
    }

    info!(discarded = queue.len(), "Synchronizer closed");
    queue.clear();
    // Dropping the pending request releases an idle worker.
    *waiting = None;
}

async fn worker_loop(chain: Arc<dyn Blockchain>, ready: mpsc::Sender<WorkRequest>) {
    loop {
        let (request, handover) = oneshot::channel();
        if ready.send(request).await.is_err() {
            break;
        }
        let Ok(task) = handover.await else {
            break;
        };

        let peer_id = task.peer_id().to_string();
        let priority = task.priority();

        // A panicking task ends its own tokio task, not the worker.
        let task_chain = chain.clone();
        let outcome = tokio::spawn(async move { task.run(task_chain.as_ref()).await }).await;

        match outcome {
            Ok(Ok(())) => info!(peer = %peer_id, priority, "Sync task completed"),
            Ok(Err(err)) => error!(peer = %peer_id, priority, error = %format!("{err:#}"), "Sync task failed"),
            Err(err) => error!(peer = %peer_id, priority, error = %err, "Sync task panicked"),
        }
    }

    debug!("Sync worker stopped");
}
