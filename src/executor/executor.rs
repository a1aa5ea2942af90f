//! # Executor: bounded admission, cooperative cancellation, graceful drain.
//!
//! The [`Executor`] runs scheduled [`Task`]s as tokio tasks, never more than
//! `capacity` at once. It owns one [`CancellationToken`] shared by every task
//! it runs and cancelled exactly once, by the first `shutdown()`.
//!
//! ## Admission
//! ```text
//! schedule(task)
//!   ├─► state != Running            → Err(AdmissionRejected)
//!   ├─► slots.acquire_owned().await (backpressure; FIFO among waiters)
//!   │     └─ semaphore closed       → Err(AdmissionRejected)
//!   └─► lock(state)
//!         ├─ state != Running       → release slot, Err(AdmissionRejected)
//!         └─ in_flight += 1, publish TaskAdmitted, tracker.spawn(worker)  → Ok(())
//!
//! worker (tokio task, owns the permit)
//!   ├─► task.run(token)             (panics caught)
//!   ├─► in_flight -= 1, release slot
//!   └─► publish TaskFinished | TaskPanicked
//! ```
//!
//! ## Shutdown
//! ```text
//! shutdown()
//!   ├─► lock(state)
//!   │     └─ Running only: state = ShuttingDown, token.cancel(), slots.close(),
//!   │        tracker.close(), publish ShutdownRequested
//!   └─► wait_terminated()
//!         ├─► tracker.wait().await      (every admitted task finished)
//!         ├─► lock(state)
//!         │     └─ ShuttingDown only: state = Terminated, publish AllDrained
//!         └─► listeners.wait().await    (subscribers processed AllDrained)
//! ```
//!
//! Admission and the shutdown transition share one lock, so no task is spawned
//! after `shutdown()` has begun. Callers still waiting for a slot are woken by
//! the closed semaphore and rejected; their task never runs.
//!
//! Every `shutdown()` call waits for the drain, not only the first one. The
//! move to `Terminated` is made by whichever waiter sees the drain end first,
//! so it still happens when an earlier `shutdown()` future was dropped.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use tokio_util::sync::CancellationToken;
//! use taskflow::{Executor, ExecutorError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ExecutorError> {
//!     let exe = Executor::new(4);
//!     let done = Arc::new(AtomicUsize::new(0));
//!
//!     for _ in 0..10 {
//!         let done = Arc::clone(&done);
//!         exe.schedule(move |ctx: CancellationToken| async move {
//!             if ctx.is_cancelled() {
//!                 return;
//!             }
//!             done.fetch_add(1, Ordering::SeqCst);
//!         })
//!         .await?;
//!     }
//!
//!     exe.shutdown().await;
//!     assert!(exe.is_terminated());
//!     assert_eq!(exe.schedule(|_ctx: CancellationToken| async {}).await, Err(ExecutorError::AdmissionRejected));
//!     Ok(())
//! }
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError, broadcast};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::builder::ExecutorBuilder;
use super::state::ExecutorState;
use super::worker;
use crate::{
    config::ExecutorConfig,
    error::ExecutorError,
    events::{Bus, Event, EventKind},
    subscribers::{Subscribe, SubscriberSet},
    tasks::Task,
};

/// State shared by executor handles and the workers they spawn.
pub(super) struct Inner {
    pub(super) capacity: usize,
    pub(super) slots: Arc<Semaphore>,
    pub(super) tracker: TaskTracker,
    pub(super) token: CancellationToken,
    /// Guards lifecycle transitions and admission.
    pub(super) state: Mutex<ExecutorState>,
    /// Mirror of `state != Running` for lock-free reads.
    pub(super) terminated: AtomicBool,
    pub(super) in_flight: AtomicUsize,
    pub(super) bus: Bus,
    /// Subscriber listener, if any. Closed right after construction.
    listeners: TaskTracker,
    /// Stops the listener after `AllDrained`, or once the last handle is gone.
    listener_stop: CancellationToken,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, ExecutorState> {
        // The guarded value is a plain enum; a panic elsewhere cannot leave it half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.listener_stop.cancel();
    }
}

/// Bounded task executor.
///
/// Cloning yields another handle to the same executor, so one clone can
/// `shutdown()` while another is blocked in `schedule()`.
#[derive(Clone)]
pub struct Executor {
    inner: Arc<Inner>,
}

impl Executor {
    /// Creates an executor that runs at most `capacity` tasks at once (`0` is coerced to `1`).
    ///
    /// Does not spawn anything, so it may be called outside a tokio runtime;
    /// `schedule` must run inside one.
    pub fn new(capacity: usize) -> Self {
        ExecutorBuilder::new(ExecutorConfig::with_capacity(capacity)).build()
    }

    /// Returns a builder for an executor with subscribers attached.
    pub fn builder(cfg: ExecutorConfig) -> ExecutorBuilder {
        ExecutorBuilder::new(cfg)
    }

    /// Assembles the executor; spawns the subscriber listener when `subs` is not empty.
    pub(super) fn from_parts(cfg: &ExecutorConfig, subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let capacity = cfg.capacity_clamped();
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let listeners = TaskTracker::new();
        let listener_stop = CancellationToken::new();

        if !subs.is_empty() {
            let rx = bus.subscribe();
            let set = SubscriberSet::spawn(subs, bus.clone());
            listeners.spawn(set.run(rx, listener_stop.clone()));
        }
        listeners.close();

        Self {
            inner: Arc::new(Inner {
                capacity,
                slots: Arc::new(Semaphore::new(capacity)),
                tracker: TaskTracker::new(),
                token: CancellationToken::new(),
                state: Mutex::new(ExecutorState::Running),
                terminated: AtomicBool::new(false),
                in_flight: AtomicUsize::new(0),
                bus,
                listeners,
                listener_stop,
            }),
        }
    }

    /// Schedules `task`, waiting for a free slot if all `capacity` slots are busy.
    ///
    /// Returns as soon as the task has been spawned; its outcome is not reported here.
    ///
    /// # Errors
    /// [`ExecutorError::AdmissionRejected`] if shutdown began before the task was
    /// spawned, including while this call was waiting for a slot.
    pub async fn schedule<T: Task>(&self, task: T) -> Result<(), ExecutorError> {
        if self.is_terminated() {
            return Err(self.reject(task.name()));
        }

        let permit = match Arc::clone(&self.inner.slots).acquire_owned().await {
            Ok(permit) => permit,
            Err(_closed) => return Err(self.reject(task.name())),
        };
        self.admit(task, permit)
    }

    /// Schedules `task` only if a slot is free right now.
    ///
    /// # Errors
    /// - [`ExecutorError::AdmissionRejected`] if shutdown has begun;
    /// - [`ExecutorError::Saturated`] if every slot is busy.
    pub fn try_schedule<T: Task>(&self, task: T) -> Result<(), ExecutorError> {
        if self.is_terminated() {
            return Err(self.reject(task.name()));
        }

        match Arc::clone(&self.inner.slots).try_acquire_owned() {
            Ok(permit) => self.admit(task, permit),
            Err(TryAcquireError::NoPermits) => Err(ExecutorError::Saturated),
            Err(TryAcquireError::Closed) => Err(self.reject(task.name())),
        }
    }

    fn admit<T: Task>(&self, task: T, permit: OwnedSemaphorePermit) -> Result<(), ExecutorError> {
        let state = self.inner.lock_state();
        if !state.is_accepting() {
            drop(state);
            drop(permit);
            return Err(self.reject(task.name()));
        }

        let name: Option<Arc<str>> = task.name().map(Arc::from);
        let in_flight = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.bus.publish(
            Event::new(EventKind::TaskAdmitted)
                .with_task_opt(name.as_deref())
                .with_in_flight(in_flight),
        );

        let token = self.inner.token.clone();
        let inner = Arc::clone(&self.inner);
        self.inner
            .tracker
            .spawn(worker::run_task(inner, task, token, name, permit));
        Ok(())
    }

    fn reject(&self, name: Option<&str>) -> ExecutorError {
        tracing::debug!(task = name.unwrap_or("-"), "admission rejected");
        self.inner
            .bus
            .publish(Event::new(EventKind::AdmissionRejected).with_task_opt(name));
        ExecutorError::AdmissionRejected
    }

    /// Stops admission, broadcasts cancellation and waits for every admitted task to finish.
    ///
    /// Only the first call changes anything. Every call, from any handle, returns
    /// once the executor is [`Terminated`](ExecutorState::Terminated); after that
    /// it returns immediately.
    ///
    /// Cancel-safe: dropping the future mid-drain leaves shutdown in progress,
    /// and the next `shutdown()` or [`wait_terminated`](Self::wait_terminated)
    /// completes it.
    pub async fn shutdown(&self) {
        self.begin_shutdown();
        self.wait_terminated().await;
    }

    fn begin_shutdown(&self) {
        let mut state = self.inner.lock_state();
        if !state.is_accepting() {
            return;
        }
        *state = ExecutorState::ShuttingDown;
        self.inner.terminated.store(true, Ordering::SeqCst);
        self.inner.token.cancel();
        self.inner.slots.close();
        self.inner.tracker.close();

        let in_flight = self.in_flight();
        tracing::debug!(in_flight, "executor shutting down");
        self.inner
            .bus
            .publish(Event::new(EventKind::ShutdownRequested).with_in_flight(in_flight));
    }

    /// Waits until shutdown has begun and every admitted task has finished.
    ///
    /// Does not initiate shutdown itself. With subscribers attached it also
    /// waits for them to process `AllDrained`.
    pub async fn wait_terminated(&self) {
        self.inner.tracker.wait().await;
        self.finish_drain();
        self.inner.listeners.wait().await;
    }

    /// Moves `ShuttingDown` to `Terminated`; a no-op for every caller but the first.
    fn finish_drain(&self) {
        let mut state = self.inner.lock_state();
        if *state != ExecutorState::ShuttingDown {
            return;
        }
        *state = ExecutorState::Terminated;
        tracing::debug!("executor terminated");
        self.inner.bus.publish(Event::new(EventKind::AllDrained));
        self.inner.listener_stop.cancel();
    }

    /// Returns `true` once `shutdown()` has begun (not necessarily finished draining).
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.inner.terminated.load(Ordering::SeqCst)
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> ExecutorState {
        *self.inner.lock_state()
    }

    /// Returns the concurrency bound.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Returns the number of admitted tasks that have not finished yet.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Returns a clone of the cancellation token handed to every task.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.inner.token.clone()
    }

    /// Creates a receiver for events published after this call.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.inner.bus.subscribe()
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("capacity", &self.capacity())
            .field("in_flight", &self.in_flight())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn noop(_ctx: CancellationToken) -> impl std::future::Future<Output = ()> + Send + 'static {
        async {}
    }

    #[test]
    fn new_coerces_zero_capacity() {
        let exe = Executor::new(0);
        assert_eq!(exe.capacity(), 1);
        assert_eq!(exe.state(), ExecutorState::Running);
        assert!(!exe.is_terminated());
    }

    #[tokio::test]
    async fn try_schedule_reports_saturation() {
        let exe = Executor::new(1);
        let gate = CancellationToken::new();

        let g = gate.clone();
        exe.try_schedule(move |_ctx: CancellationToken| async move { g.cancelled().await })
            .expect("first slot is free");
        assert_eq!(exe.try_schedule(noop), Err(ExecutorError::Saturated));

        gate.cancel();
        exe.shutdown().await;
        assert_eq!(exe.try_schedule(noop), Err(ExecutorError::AdmissionRejected));
    }

    #[tokio::test]
    async fn shutdown_moves_through_states() {
        let exe = Executor::new(1);
        let gate = CancellationToken::new();

        let g = gate.clone();
        exe.schedule(move |_ctx: CancellationToken| async move { g.cancelled().await })
            .await
            .expect("admitted");

        let handle = exe.clone();
        let drain = tokio::spawn(async move { handle.shutdown().await });

        while exe.state() == ExecutorState::Running {
            tokio::task::yield_now().await;
        }
        assert_eq!(exe.state(), ExecutorState::ShuttingDown);
        assert!(exe.is_terminated());
        assert_eq!(exe.in_flight(), 1);

        gate.cancel();
        drain.await.expect("shutdown task");
        assert_eq!(exe.state(), ExecutorState::Terminated);
        assert_eq!(exe.in_flight(), 0);
    }

    #[tokio::test]
    async fn every_shutdown_call_waits_for_the_drain() {
        let exe = Executor::new(2);
        let gate = CancellationToken::new();

        for _ in 0..2 {
            let g = gate.clone();
            exe.schedule(move |_ctx: CancellationToken| async move { g.cancelled().await })
                .await
                .expect("admitted");
        }

        let first = {
            let exe = exe.clone();
            tokio::spawn(async move { exe.shutdown().await })
        };
        while !exe.is_terminated() {
            tokio::task::yield_now().await;
        }
        let second = {
            let exe = exe.clone();
            tokio::spawn(async move { exe.shutdown().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!second.is_finished(), "second call returned while tasks were running");
        assert_eq!(exe.in_flight(), 2);
        assert_eq!(exe.state(), ExecutorState::ShuttingDown);

        gate.cancel();
        second.await.expect("second shutdown");
        assert_eq!(exe.in_flight(), 0);
        assert_eq!(exe.state(), ExecutorState::Terminated);
        first.await.expect("first shutdown");

        tokio::time::timeout(Duration::from_millis(50), exe.shutdown())
            .await
            .expect("shutdown of a terminated executor returns at once");
    }

    #[tokio::test]
    async fn dropped_shutdown_is_completed_by_the_next_waiter() {
        let exe = Executor::new(1);
        let mut events = exe.events();
        let gate = CancellationToken::new();

        let g = gate.clone();
        exe.schedule(move |_ctx: CancellationToken| async move { g.cancelled().await })
            .await
            .expect("admitted");

        let res = tokio::time::timeout(Duration::from_millis(5), exe.shutdown()).await;
        assert!(res.is_err(), "drain cannot finish while the task is gated");
        assert_eq!(exe.state(), ExecutorState::ShuttingDown);

        gate.cancel();
        exe.wait_terminated().await;
        assert_eq!(exe.state(), ExecutorState::Terminated);
        exe.shutdown().await;

        let mut drained = 0;
        while let Ok(ev) = events.try_recv() {
            if ev.kind == EventKind::AllDrained {
                drained += 1;
            }
        }
        assert_eq!(drained, 1);
    }

    #[tokio::test]
    async fn cancellation_token_is_shared_with_tasks() {
        let exe = Executor::new(2);
        let token = exe.cancellation_token();
        assert!(!token.is_cancelled());

        exe.shutdown().await;
        assert!(token.is_cancelled());
    }
}
