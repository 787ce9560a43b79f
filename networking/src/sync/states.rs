/// Scheduler lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Accepting tasks and dispatching them to the worker.
    #[default]
    Running,

    /// Closed for good. Queued tasks were discarded and nothing more is
    /// dispatched; a task already handed to the worker runs to completion.
    Closed,
}

impl SchedulerState {
    pub fn can_transition_to(&self, target: SchedulerState) -> bool {
        match self {
            SchedulerState::Running => matches!(target, SchedulerState::Closed),
            SchedulerState::Closed => false,
        }
    }
}
