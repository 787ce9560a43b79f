/// Pending sync tasks, at most one per peer.
///
/// Selection picks the highest priority. Among equal priorities the peer that
/// first entered the queue wins, and a peer keeps that position when it
/// replaces its task with a newer announcement.
use std::cmp::Reverse;
use std::collections::HashMap;

use super::task::Task;

struct QueuedTask {
    seq: u64,
    task: Box<dyn Task>,
}

#[derive(Default)]
pub struct TaskQueue {
    tasks: HashMap<String, QueuedTask>,
    next_seq: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task`, returning the task it replaced for the same peer.
    pub fn insert(&mut self, task: Box<dyn Task>) -> Option<Box<dyn Task>> {
        let peer_id = task.peer_id().to_string();
        match self.tasks.get_mut(&peer_id) {
            Some(queued) => Some(std::mem::replace(&mut queued.task, task)),
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.tasks.insert(peer_id, QueuedTask { seq, task });
                None
            }
        }
    }

    /// Removes and returns the task that should run next.
    pub fn pop_best(&mut self) -> Option<Box<dyn Task>> {
        let peer_id = self
            .tasks
            .iter()
            .max_by_key(|(_, queued)| (queued.task.priority(), Reverse(queued.seq)))
            .map(|(peer_id, _)| peer_id.clone())?;
        self.tasks.remove(&peer_id).map(|queued| queued.task)
    }

    pub fn contains_peer(&self, peer_id: &str) -> bool {
        self.tasks.contains_key(peer_id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
