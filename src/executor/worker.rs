//! # Per-task wrapper.
//!
//! [`run_task`] is what the executor actually spawns for each admitted task:
//! it owns the slot permit, contains panics and reports the exit.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use futures::FutureExt;
use tokio::sync::OwnedSemaphorePermit;
use tokio_util::sync::CancellationToken;

use super::executor::Inner;
use crate::{
    error::panic_message,
    events::{Event, EventKind},
    tasks::Task,
};

/// Runs one admitted task while holding its slot.
///
/// The slot is released and `in_flight` decremented before the exit event is
/// published, whether the task returned or panicked.
pub(super) async fn run_task<T: Task>(
    inner: Arc<Inner>,
    task: T,
    token: CancellationToken,
    name: Option<Arc<str>>,
    permit: OwnedSemaphorePermit,
) {
    let outcome = AssertUnwindSafe(async move { task.run(token).await })
        .catch_unwind()
        .await;

    let remaining = inner.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
    drop(permit);

    let ev = match outcome {
        Ok(()) => Event::new(EventKind::TaskFinished),
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            tracing::warn!(task = name.as_deref().unwrap_or("-"), %reason, "task panicked");
            Event::new(EventKind::TaskPanicked).with_reason(reason)
        }
    };
    inner
        .bus
        .publish(ev.with_task_opt(name.as_deref()).with_in_flight(remaining));
}
