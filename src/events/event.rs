//! # Runtime events emitted by the executor.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Task events**: admission, completion, panic of a single scheduled task
//! - **Lifecycle events**: shutdown requested, drain finished
//! - **Subscriber events**: overflow and panic inside observers
//!
//! The [`Event`] struct carries metadata such as timestamps, the optional task
//! name, a reason, and the number of in-flight tasks at publish time.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use taskflow::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskPanicked)
//!     .with_task("resize-image")
//!     .with_reason("index out of bounds")
//!     .with_in_flight(3);
//!
//! assert_eq!(ev.kind, EventKind::TaskPanicked);
//! assert_eq!(ev.task.as_deref(), Some("resize-image"));
//! assert_eq!(ev.in_flight, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Task events ===
    /// A task acquired a slot and was spawned.
    ///
    /// Sets:
    /// - `task`: task name (if the task has one)
    /// - `in_flight`: admitted-but-unfinished tasks, this one included
    TaskAdmitted,

    /// A task returned and released its slot.
    ///
    /// Sets:
    /// - `task`: task name (if the task has one)
    /// - `in_flight`: remaining admitted-but-unfinished tasks
    TaskFinished,

    /// A task panicked; its slot was released.
    ///
    /// Sets:
    /// - `task`: task name (if the task has one)
    /// - `reason`: panic info/message
    /// - `in_flight`: remaining admitted-but-unfinished tasks
    TaskPanicked,

    /// A schedule call was refused because shutdown has begun.
    ///
    /// Sets:
    /// - `task`: task name (if the task has one)
    AdmissionRejected,

    // === Lifecycle events ===
    /// First `shutdown()` call: cancellation broadcast, admission closed.
    ///
    /// Sets:
    /// - `in_flight`: tasks still to be drained
    ShutdownRequested,

    /// Every admitted task has finished; the executor is terminated.
    AllDrained,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the task (or subscriber), if applicable.
    pub task: Option<Arc<str>>,
    /// Human-readable reason (panic messages, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Admitted-but-unfinished task count observed when the event was built.
    pub in_flight: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            reason: None,
            in_flight: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a task name if there is one.
    #[inline]
    pub fn with_task_opt(self, task: Option<&str>) -> Self {
        match task {
            Some(name) => self.with_task(name),
            None => self,
        }
    }

    /// Attaches the in-flight count (saturates at `u32::MAX`).
    #[inline]
    pub fn with_in_flight(mut self, n: usize) -> Self {
        self.in_flight = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::TaskAdmitted);
        let b = Event::new(EventKind::TaskFinished);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn optional_task_name() {
        let unnamed = Event::new(EventKind::TaskFinished).with_task_opt(None);
        assert!(unnamed.task.is_none());

        let named = Event::new(EventKind::TaskFinished).with_task_opt(Some("job"));
        assert_eq!(named.task.as_deref(), Some("job"));
    }

    #[test]
    fn overflow_helper_sets_reason() {
        let ev = Event::subscriber_overflow("metrics", "full");
        assert!(ev.is_subscriber_overflow());
        assert_eq!(ev.reason.as_deref(), Some("subscriber=metrics reason=full"));
    }
}
