//! # LogWriter: renders executor events through `tracing`.
//!
//! Records carry the event `seq` plus whatever fields the event kind sets.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO taskflow: task admitted seq=3 task="resize" in_flight=2
//! INFO taskflow: task finished seq=7 task="resize" in_flight=1
//! WARN taskflow: task panicked seq=9 task="-" reason="boom" in_flight=0
//! INFO taskflow: shutdown requested seq=10 in_flight=2
//! INFO taskflow: all tasks drained seq=14
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let task = e.task.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("-");
        let in_flight = e.in_flight.unwrap_or(0);

        match e.kind {
            EventKind::TaskAdmitted => {
                tracing::info!(target: "taskflow", seq = e.seq, task, in_flight, "task admitted");
            }
            EventKind::TaskFinished => {
                tracing::info!(target: "taskflow", seq = e.seq, task, in_flight, "task finished");
            }
            EventKind::TaskPanicked => {
                tracing::warn!(target: "taskflow", seq = e.seq, task, reason, in_flight, "task panicked");
            }
            EventKind::AdmissionRejected => {
                tracing::warn!(target: "taskflow", seq = e.seq, task, "admission rejected");
            }
            EventKind::ShutdownRequested => {
                tracing::info!(target: "taskflow", seq = e.seq, in_flight, "shutdown requested");
            }
            EventKind::AllDrained => {
                tracing::info!(target: "taskflow", seq = e.seq, "all tasks drained");
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(target: "taskflow", seq = e.seq, subscriber = task, reason, "subscriber overflow");
            }
            EventKind::SubscriberPanicked => {
                tracing::error!(target: "taskflow", seq = e.seq, subscriber = task, reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
