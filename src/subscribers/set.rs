//! # Executor-owned fan-out of bus events to subscribers.
//!
//! ```text
//! Bus ──► run(rx) ──► fan_out(event)
//!                       ├──► accepts(kind)? ──► [queue 1] ──► worker 1 ──► on_event()
//!                       └──► accepts(kind)? ──► [queue N] ──► worker N ──► on_event()
//!
//! AllDrained fanned out | stop ──► flush: close queues, join workers
//! ```
//!
//! ## Rules
//! - Fan-out never waits. A full queue drops the event for that subscriber only
//!   and publishes `SubscriberOverflow`, unless the dropped event was an overflow report.
//! - Each subscriber sees the events it accepts in publish order.
//! - A subscriber never receives overflow or panic reports about itself.
//! - Workers wrap each call in `AssertUnwindSafe(..).catch_unwind()`, so a subscriber
//!   holding a lock while panicking may leave its own state poisoned.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::panic_message;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

struct Queue {
    sub: Arc<dyn Subscribe>,
    tx: mpsc::Sender<Arc<Event>>,
    dropped: u64,
}

impl Queue {
    fn wants(&self, event: &Event) -> bool {
        let own_report = matches!(
            event.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        ) && event.task.as_deref() == Some(self.sub.name());
        !own_report && self.sub.accepts(event.kind)
    }
}

/// One bounded queue and one worker per subscriber, driven by [`run`](Self::run).
pub(crate) struct SubscriberSet {
    queues: Vec<Queue>,
    workers: JoinSet<()>,
    bus: Bus,
}

impl SubscriberSet {
    /// Spawns a worker per subscriber. Must be called from within a tokio runtime.
    pub(crate) fn spawn(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut workers = JoinSet::new();
        let queues = subs
            .into_iter()
            .map(|sub| {
                let (tx, rx) = mpsc::channel(sub.queue_capacity().max(1));
                workers.spawn(deliver(Arc::clone(&sub), rx, bus.clone()));
                Queue { sub, tx, dropped: 0 }
            })
            .collect();
        Self {
            queues,
            workers,
            bus,
        }
    }

    /// Forwards events from `rx` until `AllDrained` was fanned out, the bus
    /// closed or `stop` fired, then waits for every queue to be processed.
    pub(crate) async fn run(mut self, mut rx: broadcast::Receiver<Event>, stop: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                msg = rx.recv() => match msg {
                    Ok(ev) => {
                        let drained = ev.kind == EventKind::AllDrained;
                        self.fan_out(ev);
                        if drained {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "subscriber listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = stop.cancelled() => break,
            }
        }
        self.flush().await;
    }

    fn fan_out(&mut self, event: Event) {
        let is_overflow = event.is_subscriber_overflow();
        let event = Arc::new(event);

        for queue in &mut self.queues {
            if !queue.wants(&event) {
                continue;
            }
            let reason = match queue.tx.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(TrySendError::Full(_)) => "full",
                Err(TrySendError::Closed(_)) => "closed",
            };
            queue.dropped += 1;
            tracing::warn!(
                subscriber = queue.sub.name(),
                reason,
                dropped = queue.dropped,
                "subscriber dropped an event"
            );
            if !is_overflow {
                self.bus
                    .publish(Event::subscriber_overflow(queue.sub.name(), reason));
            }
        }
    }

    async fn flush(self) {
        let Self {
            queues,
            mut workers,
            ..
        } = self;
        drop(queues);
        while let Some(res) = workers.join_next().await {
            if let Err(err) = res {
                tracing::warn!(error = %err, "subscriber worker did not finish");
            }
        }
    }
}

async fn deliver(sub: Arc<dyn Subscribe>, mut rx: mpsc::Receiver<Arc<Event>>, bus: Bus) {
    while let Some(ev) = rx.recv().await {
        let res = AssertUnwindSafe(sub.on_event(ev.as_ref())).catch_unwind().await;
        if let Err(payload) = res {
            let reason = panic_message(payload.as_ref());
            tracing::warn!(subscriber = sub.name(), %reason, "subscriber panicked");
            bus.publish(Event::subscriber_panicked(sub.name(), reason));
        }
    }
}
