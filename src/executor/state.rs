//! # Executor lifecycle.
//!
//! ```text
//! Running ──shutdown()──► ShuttingDown ──drain done──► Terminated
//! ```
//!
//! Transitions only move forward; `Running` is never re-entered.

/// Lifecycle state of an [`Executor`](crate::Executor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    /// Accepting new tasks.
    Running,
    /// Cancellation broadcast, admission closed, waiting for admitted tasks.
    ShuttingDown,
    /// Every admitted task has finished.
    Terminated,
}

impl ExecutorState {
    /// Returns `true` if the executor still admits tasks.
    #[inline]
    pub fn is_accepting(self) -> bool {
        matches!(self, ExecutorState::Running)
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            ExecutorState::Running => "running",
            ExecutorState::ShuttingDown => "shutting_down",
            ExecutorState::Terminated => "terminated",
        }
    }
}
