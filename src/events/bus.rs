//! Per-executor event channel.
//!
//! ```text
//!   schedule()    ──┐                 ┌──► subscriber listener (if any)
//!   task wrapper  ──┼──► Bus ─────────┤
//!   shutdown()    ──┘   (broadcast)   └──► Executor::events() receivers
//! ```
//!
//! `publish()` never blocks; with no receivers the event is dropped. A receiver
//! that falls behind the shared ring of `bus_capacity` events sees
//! `RecvError::Lagged(n)` and skips `n` events.

use tokio::sync::broadcast;

use super::event::Event;

#[derive(Clone, Debug)]
pub(crate) struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus; `capacity` is clamped to at least 1.
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    pub(crate) fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver that observes events sent after this call.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
